use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::game::Game;
use crate::core::renderer::GameRenderer;
use crate::games::hangman::game::{GuessOutcome, HangmanEngine, Letter, RoundEnded};
use crate::games::hangman::random::IndexSource;
use crate::games::hangman::renderer::HangmanRenderer;

/// Delay between the round ending and the result panel appearing.
pub const DEFAULT_RESULT_DELAY: Duration = Duration::from_millis(600);

/// How long the gallows shakes after a wrong guess.
pub const SHAKE_DURATION: Duration = Duration::from_millis(500);

/// Keys per row of the on-screen keyboard.
pub const KEYBOARD_COLUMNS: usize = 9;

const ALPHABET: usize = 26;

/// How an on-screen key should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Unused,
    Hit,
    Miss,
    /// Never pressed, but the round is over.
    Disabled,
}

/// Result panel lifecycle. The round is already final while `Pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPanel {
    Hidden,
    Pending { remaining: Duration, ended: RoundEnded },
    Shown(RoundEnded),
}

/// Terminal presentation of a hangman round.
///
/// Owns the engine and everything that is purely visual: keyboard cursor,
/// status line, shake timer and the delayed result panel.
pub struct HangmanView<S: IndexSource> {
    engine: HangmanEngine<S>,
    cursor: usize,
    message: String,
    shake: Duration,
    result_delay: Duration,
    panel: ResultPanel,
    quit: bool,
}

impl<S: IndexSource> HangmanView<S> {
    pub fn new(engine: HangmanEngine<S>, result_delay: Duration) -> Self {
        Self {
            engine,
            cursor: 0,
            message: welcome_message(),
            shake: Duration::ZERO,
            result_delay,
            panel: ResultPanel::Hidden,
            quit: false,
        }
    }

    pub fn engine(&self) -> &HangmanEngine<S> {
        &self.engine
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Letter under the keyboard cursor.
    pub fn cursor_letter(&self) -> char {
        key_letter(self.cursor)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_shaking(&self) -> bool {
        !self.shake.is_zero()
    }

    pub fn panel(&self) -> &ResultPanel {
        &self.panel
    }

    pub fn key_status(&self, c: char) -> KeyStatus {
        let state = self.engine.state();
        if state.guessed_chars().contains(&c) {
            if state.revealed_letters().contains(&c) {
                KeyStatus::Hit
            } else {
                KeyStatus::Miss
            }
        } else if state.is_over() {
            KeyStatus::Disabled
        } else {
            KeyStatus::Unused
        }
    }

    /// Starts a new round and resets every piece of presentation state.
    pub fn restart(&mut self) {
        self.engine.start_new_round();
        self.cursor = 0;
        self.shake = Duration::ZERO;
        self.panel = ResultPanel::Hidden;
        self.message = welcome_message();
    }

    pub fn submit(&mut self, letter: Letter) {
        let outcome = self.engine.guess(letter);
        let upper = letter.as_char().to_ascii_uppercase();

        self.message = match &outcome {
            GuessOutcome::Correct { positions, .. } => match positions.len() {
                1 => format!("'{upper}' is in the word."),
                n => format!("'{upper}' is in the word {n} times."),
            },
            GuessOutcome::Wrong { wrong_guess_count, .. } => {
                self.shake = SHAKE_DURATION;
                let max = self.engine.state().max_wrong_guesses();
                format!("Sorry, '{upper}' is not in the word. ({wrong_guess_count} / {max})")
            }
            GuessOutcome::AlreadyGuessed(_) => format!("You already tried '{upper}'."),
            GuessOutcome::AlreadyOver => "The round is over. Press Enter to play again.".to_string(),
        };

        if let Some(ended) = outcome.round_ended() {
            self.panel = if self.result_delay.is_zero() {
                ResultPanel::Shown(ended.clone())
            } else {
                ResultPanel::Pending {
                    remaining: self.result_delay,
                    ended: ended.clone(),
                }
            };
        }
    }

    fn move_cursor(&mut self, code: KeyCode) {
        self.cursor = match code {
            KeyCode::Left => (self.cursor + ALPHABET - 1) % ALPHABET,
            KeyCode::Right => (self.cursor + 1) % ALPHABET,
            KeyCode::Up => self.cursor.checked_sub(KEYBOARD_COLUMNS).unwrap_or(self.cursor),
            KeyCode::Down => {
                let below = self.cursor + KEYBOARD_COLUMNS;
                if below < ALPHABET { below } else { self.cursor }
            }
            _ => self.cursor,
        };
    }

    fn press_cursor_key(&mut self) {
        if let Ok(letter) = Letter::new(self.cursor_letter()) {
            self.submit(letter);
        }
    }
}

impl<S: IndexSource> Game for HangmanView<S> {
    fn on_tick(&mut self, dt: Duration) {
        self.shake = self.shake.saturating_sub(dt);

        if let ResultPanel::Pending { remaining, ended } = &mut self.panel {
            *remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                self.panel = ResultPanel::Shown(ended.clone());
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.quit = true;
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('r') => self.restart(),
                KeyCode::Char('c') => self.quit = true,
                _ => {}
            }
            return;
        }

        // the round is final even while the panel is still pending
        if self.engine.state().is_over() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P')) {
                self.restart();
            }
            return;
        }

        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => self.move_cursor(key.code),
            KeyCode::Enter | KeyCode::Char(' ') => self.press_cursor_key(),
            KeyCode::Char(c) => match Letter::new(c) {
                Ok(letter) => self.submit(letter),
                Err(e) => {
                    tracing::debug!(error = %e, "rejected key");
                    self.message = format!("'{c}' is not a letter.");
                }
            },
            _ => {}
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        HangmanRenderer.render(frame, self);
    }

    fn should_quit(&self) -> bool {
        self.quit
    }
}

/// Lowercase letter for on-screen key `index` (0 = 'a').
pub fn key_letter(index: usize) -> char {
    char::from(b'a' + (index % ALPHABET) as u8)
}

fn welcome_message() -> String {
    "Type a letter, or use the arrows and Enter.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hangman::catalog::{WordCatalog, WordEntry};

    struct Fixed(usize);

    impl IndexSource for Fixed {
        fn next_index(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    fn view(word: &str, delay: Duration) -> HangmanView<Fixed> {
        let catalog = WordCatalog::new(vec![WordEntry::new(word, "hint").unwrap()]);
        HangmanView::new(HangmanEngine::new(catalog, Fixed(0)), delay)
    }

    fn press(view: &mut HangmanView<Fixed>, code: KeyCode) {
        view.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn panel_waits_for_the_delay() {
        let mut v = view("ab", DEFAULT_RESULT_DELAY);
        press(&mut v, KeyCode::Char('a'));
        press(&mut v, KeyCode::Char('B'));

        // the round is final before anything is shown
        assert!(v.engine().state().is_over());
        assert!(matches!(v.panel(), ResultPanel::Pending { .. }));

        v.on_tick(Duration::from_millis(300));
        assert!(matches!(v.panel(), ResultPanel::Pending { .. }));

        v.on_tick(Duration::from_millis(300));
        match v.panel() {
            ResultPanel::Shown(ended) => {
                assert!(ended.is_victory);
                assert_eq!(ended.secret_word, "ab");
            }
            other => panic!("expected Shown, got {other:?}"),
        }
    }

    #[test]
    fn enter_on_panel_restarts() {
        let mut v = view("a", Duration::ZERO);
        for c in ['x', 'y', 'z', 'q', 'w', 'v'] {
            press(&mut v, KeyCode::Char(c));
        }
        assert!(matches!(v.panel(), ResultPanel::Shown(RoundEnded { is_victory: false, .. })));
        assert_eq!(v.key_status('b'), KeyStatus::Disabled);
        assert_eq!(v.key_status('x'), KeyStatus::Miss);

        press(&mut v, KeyCode::Enter);

        assert_eq!(v.panel(), &ResultPanel::Hidden);
        assert_eq!(v.engine().state().wrong_guess_count(), 0);
        assert_eq!(v.key_status('x'), KeyStatus::Unused);
        assert!(!v.is_shaking());
        assert_eq!(v.engine().rounds_started(), 2);
    }

    #[test]
    fn ctrl_r_restarts_mid_round() {
        let mut v = view("cat", DEFAULT_RESULT_DELAY);
        press(&mut v, KeyCode::Char('c'));
        v.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(v.engine().state().guessed_chars().is_empty());
    }

    #[test]
    fn wrong_guess_shakes_then_settles() {
        let mut v = view("cat", DEFAULT_RESULT_DELAY);
        press(&mut v, KeyCode::Char('z'));
        assert!(v.is_shaking());
        assert_eq!(v.key_status('z'), KeyStatus::Miss);

        v.on_tick(SHAKE_DURATION);
        assert!(!v.is_shaking());
    }

    #[test]
    fn arrows_and_enter_press_on_screen_keys() {
        let mut v = view("cat", DEFAULT_RESULT_DELAY);
        press(&mut v, KeyCode::Left);
        assert_eq!(v.cursor_letter(), 'z');
        press(&mut v, KeyCode::Right);
        press(&mut v, KeyCode::Down);
        press(&mut v, KeyCode::Down);
        assert_eq!(v.cursor_letter(), 's');
        press(&mut v, KeyCode::Down);
        assert_eq!(v.cursor_letter(), 's');
        press(&mut v, KeyCode::Right);
        press(&mut v, KeyCode::Char(' '));

        assert_eq!(v.key_status('t'), KeyStatus::Hit);
        assert_eq!(v.engine().state().masked_word(), vec![None, None, Some('t')]);
    }

    #[test]
    fn repeated_and_invalid_keys_only_change_the_message() {
        let mut v = view("cat", DEFAULT_RESULT_DELAY);
        press(&mut v, KeyCode::Char('c'));
        let state = v.engine().state().clone();

        press(&mut v, KeyCode::Char('c'));
        assert!(v.message().contains("already"));
        press(&mut v, KeyCode::Char('7'));
        assert!(v.message().contains("not a letter"));
        assert_eq!(v.engine().state(), &state);
    }

    #[test]
    fn escape_quits() {
        let mut v = view("cat", DEFAULT_RESULT_DELAY);
        assert!(!v.should_quit());
        press(&mut v, KeyCode::Esc);
        assert!(v.should_quit());
    }

    #[test]
    fn enter_restarts_before_the_panel_appears() {
        let mut v = view("ab", DEFAULT_RESULT_DELAY);
        press(&mut v, KeyCode::Char('a'));
        press(&mut v, KeyCode::Char('b'));
        assert!(matches!(v.panel(), ResultPanel::Pending { .. }));

        press(&mut v, KeyCode::Char('z'));
        assert!(!v.engine().state().is_guessed(Letter::new('z').unwrap()));

        press(&mut v, KeyCode::Enter);
        assert_eq!(v.panel(), &ResultPanel::Hidden);
        assert!(!v.engine().state().is_over());
        assert_eq!(v.engine().rounds_started(), 2);
    }
}
