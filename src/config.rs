//! Runtime configuration for the terminal game.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::games::hangman::view::DEFAULT_RESULT_DELAY;

const APP_DIR: &str = "hangterm";

#[derive(Clone, Debug)]
pub struct GameConfig {
    /// JSON word catalog; the built-in list when `None`.
    pub words_path: Option<PathBuf>,
    /// Seed for word selection; OS entropy when `None`.
    pub seed: Option<u64>,
    pub log_dir: PathBuf,
    /// Pause between the end of a round and the result panel.
    pub result_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            words_path: None,
            seed: None,
            log_dir: default_log_dir(),
            result_delay: DEFAULT_RESULT_DELAY,
        }
    }
}

impl GameConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HANGTERM_WORDS` - Path to a JSON word catalog
    /// - `HANGTERM_SEED` - Seed for word selection
    /// - `HANGTERM_LOG_DIR` - Directory for `hangterm.log`
    /// - `HANGTERM_RESULT_DELAY_MS` - Result panel delay in milliseconds (default: 600)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(path) = env::var_os("HANGTERM_WORDS") {
            config.words_path = Some(PathBuf::from(path));
        }
        if let Some(seed) = read_env::<u64>("HANGTERM_SEED") {
            config.seed = Some(seed);
        }
        if let Some(dir) = env::var_os("HANGTERM_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(ms) = read_env::<u64>("HANGTERM_RESULT_DELAY_MS") {
            config.result_delay = Duration::from_millis(ms);
        }

        config
    }

    /// Flags given to `play` win over the environment.
    pub fn apply_play_args(&mut self, words: Option<PathBuf>, seed: Option<u64>) {
        if words.is_some() {
            self.words_path = words;
        }
        if seed.is_some() {
            self.seed = seed;
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Platform cache directory for logs, falling back to the working directory.
fn default_log_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Caches")
                .join(APP_DIR)
                .join("logs");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(local_appdata) = env::var_os("LOCALAPPDATA") {
            return PathBuf::from(local_appdata).join(APP_DIR).join("logs");
        }
    }

    if let Some(xdg_cache) = env::var_os("XDG_CACHE_HOME") {
        return PathBuf::from(xdg_cache).join(APP_DIR).join("logs");
    }
    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".cache").join(APP_DIR).join("logs");
    }

    PathBuf::from(".").join(APP_DIR).join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GameConfig::default();
        assert!(config.words_path.is_none());
        assert!(config.seed.is_none());
        assert_eq!(config.result_delay, Duration::from_millis(600));
        assert!(config.log_dir.ends_with("logs"));
    }

    #[test]
    fn env_then_flags() {
        env::set_var("HANGTERM_SEED", "42");
        env::set_var("HANGTERM_RESULT_DELAY_MS", "150");
        env::set_var("HANGTERM_WORDS", "/tmp/words.json");
        env::set_var("HANGTERM_LOG_DIR", "/tmp/hangterm-logs");

        let mut config = GameConfig::from_env();

        env::remove_var("HANGTERM_SEED");
        env::remove_var("HANGTERM_RESULT_DELAY_MS");
        env::remove_var("HANGTERM_WORDS");
        env::remove_var("HANGTERM_LOG_DIR");

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.result_delay, Duration::from_millis(150));
        assert_eq!(config.words_path, Some(PathBuf::from("/tmp/words.json")));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/hangterm-logs"));

        config.apply_play_args(None, None);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.words_path, Some(PathBuf::from("/tmp/words.json")));

        config.apply_play_args(Some(PathBuf::from("mine.json")), Some(7));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.words_path, Some(PathBuf::from("mine.json")));
    }
}
