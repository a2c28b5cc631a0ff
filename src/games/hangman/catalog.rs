use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::HangmanError;
use super::random::IndexSource;

/// Word used when the catalog has nothing to offer.
pub const FALLBACK_WORD: &str = "hangman";
pub const FALLBACK_HINT: &str = "A word game";

const BUILTIN_WORDS: &[(&str, &str)] = &[
    ("guitar", "A musical instrument with strings."),
    ("oxygen", "A colorless, odorless gas essential for life."),
    ("mountain", "A large natural elevation of the Earth's surface."),
    ("painting", "An art form using colors on a surface to create images."),
    ("astronomy", "The scientific study of celestial objects and phenomena."),
    ("football", "A popular sport played with a spherical ball."),
    ("chocolate", "A sweet treat made from cocoa beans."),
    ("butterfly", "An insect with colorful wings and a slender body."),
    ("history", "The study of past events and human civilization."),
    ("pizza", "A savory dish consisting of a round, flattened base with toppings."),
    ("jazz", "A genre of music characterized by improvisation and syncopation."),
    ("camera", "A device used to capture and record images or videos."),
    ("diamond", "A precious gemstone known for its brilliance and hardness."),
    ("adventure", "An exciting or daring experience."),
    ("science", "The systematic study of the structure and behavior of the physical world."),
    ("bicycle", "A human-powered vehicle with two wheels."),
    ("sunset", "The daily disappearance of the sun below the horizon."),
    ("coffee", "A popular caffeinated beverage made from roasted beans."),
    ("dance", "A rhythmic movement of the body often performed to music."),
    ("galaxy", "A vast system of stars, gas, and dust held together by gravity."),
    ("orchestra", "A large ensemble of musicians playing various instruments."),
    ("volcano", "A mountain or hill with a vent through which lava erupts."),
    ("novel", "A long work of fiction, typically with a complex plot and characters."),
    ("sculpture", "A three-dimensional art form created by shaping materials."),
    ("symphony", "A long musical composition for a full orchestra."),
    ("architecture", "The art and science of designing buildings and structures."),
    ("ballet", "A classical dance form characterized by precise movements."),
    ("astronaut", "A person trained to travel and work in space."),
    ("waterfall", "A cascade of water falling from a height."),
    ("technology", "The application of scientific knowledge for practical purposes."),
    ("rainbow", "A meteorological phenomenon that is caused by light refraction."),
    ("universe", "All existing matter, space, and time as a whole."),
    ("piano", "A musical instrument played by pressing keys."),
    ("vacation", "A period of time devoted to pleasure, rest, or relaxation."),
    ("rainforest", "A dense forest characterized by high rainfall and biodiversity."),
    ("theater", "A building or outdoor area where plays are performed."),
    ("telephone", "A device used to transmit sound over long distances."),
    ("language", "A system of communication consisting of words and gestures."),
    ("desert", "A barren or arid land with little or no precipitation."),
    ("sunflower", "A tall plant with a large yellow flower head."),
    ("fantasy", "A genre of imaginative fiction involving magic and supernatural elements."),
    ("telescope", "An optical instrument used to view distant objects in space."),
    ("breeze", "A gentle wind."),
    ("oasis", "A fertile spot in a desert where water is found."),
    ("photography", "The art of capturing images using a camera."),
    ("safari", "An expedition to observe wild animals in their natural habitat."),
    ("planet", "A celestial body that orbits a star."),
    ("river", "A large natural stream of water flowing in a channel."),
    ("tropical", "Relating to or situated in the region between the tropics."),
    ("mysterious", "Difficult or impossible to understand or explain."),
    ("enigma", "Something that is mysterious or puzzling."),
    ("paradox", "A statement that contradicts itself or seems absurd."),
    ("puzzle", "A game or problem that tests ingenuity or knowledge."),
    ("whisper", "To speak very softly or quietly."),
    ("shadow", "A dark area or shape produced by an object blocking light."),
    ("secret", "Something kept hidden or unknown to others."),
    ("curiosity", "A strong desire to know or learn something."),
    ("unpredictable", "Not able to be foreseen or known beforehand."),
    ("obfuscate", "To confuse or bewilder someone."),
    ("unveil", "To make known or reveal something previously secret."),
    ("illusion", "A false perception or belief."),
    ("moonlight", "The light from the moon."),
    ("vibrant", "Full of energy, brightness, and life."),
    ("nostalgia", "A sentimental longing for the past."),
    ("brilliant", "Exceptionally clever, talented, or impressive."),
];

/// A word and the hint shown while it is being guessed.
///
/// Only constructible through [`WordEntry::new`], so `word` is always
/// non-empty lowercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordEntry {
    word: String,
    hint: String,
}

impl WordEntry {
    pub fn new(word: &str, hint: impl Into<String>) -> Result<Self, HangmanError> {
        let word = normalize_word(word)?;
        Ok(Self { word, hint: hint.into() })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub(crate) fn fallback() -> Self {
        Self {
            word: FALLBACK_WORD.to_string(),
            hint: FALLBACK_HINT.to_string(),
        }
    }
}

/// Lowercases `word` and checks it is made of ASCII letters only.
pub(crate) fn normalize_word(word: &str) -> Result<String, HangmanError> {
    let trimmed = word.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(HangmanError::InvalidWord(word.to_string()));
    }
    Ok(trimmed.to_ascii_lowercase())
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    word: String,
    #[serde(default)]
    hint: String,
}

/// Ordered, read-only list of words a round can be drawn from.
#[derive(Debug, Clone, Default)]
pub struct WordCatalog {
    entries: Vec<WordEntry>,
}

impl WordCatalog {
    pub fn new(entries: Vec<WordEntry>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        let entries = BUILTIN_WORDS
            .iter()
            .filter_map(|(word, hint)| WordEntry::new(word, *hint).ok())
            .collect();
        Self { entries }
    }

    /// Parses a JSON array of `{"word": .., "hint": ..}` objects.
    ///
    /// Entries with an unusable word are skipped, not fatal.
    pub fn from_json_str(json: &str) -> Result<Self, HangmanError> {
        let raw: Vec<RawEntry> = serde_json::from_str(json)?;
        let total = raw.len();

        let entries: Vec<WordEntry> = raw
            .into_iter()
            .filter_map(|entry| match WordEntry::new(&entry.word, entry.hint) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping catalog entry");
                    None
                }
            })
            .collect();

        debug!(kept = entries.len(), total, "parsed word catalog");
        Ok(Self { entries })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, HangmanError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| HangmanError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.iter()
    }

    /// Draws one entry. An index at or past the end is clamped to the last
    /// entry instead of panicking.
    pub fn pick(&self, source: &mut impl IndexSource) -> Option<&WordEntry> {
        let last = self.entries.len().checked_sub(1)?;
        let index = source.next_index(self.entries.len()).min(last);
        self.entries.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct Fixed(usize);

    impl IndexSource for Fixed {
        fn next_index(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = WordCatalog::builtin();
        assert_eq!(catalog.len(), BUILTIN_WORDS.len());
        assert!(catalog
            .iter()
            .all(|e| e.word().chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn entry_normalizes_case() {
        let entry = WordEntry::new("  RuSt ", "a language").unwrap();
        assert_eq!(entry.word(), "rust");
        assert_eq!(entry.hint(), "a language");
    }

    #[test]
    fn entry_rejects_non_letters() {
        assert!(matches!(
            WordEntry::new("ice cream", ""),
            Err(HangmanError::InvalidWord(_))
        ));
        assert!(WordEntry::new("", "").is_err());
        assert!(WordEntry::new("café", "").is_err());
    }

    #[test]
    fn json_skips_bad_entries() {
        let json = r#"[
            {"word": "Cat", "hint": "meows"},
            {"word": "two words", "hint": "nope"},
            {"word": "dog"}
        ]"#;
        let catalog = WordCatalog::from_json_str(json).unwrap();
        let words: Vec<&str> = catalog.iter().map(WordEntry::word).collect();
        assert_eq!(words, ["cat", "dog"]);
        assert_eq!(catalog.iter().nth(1).unwrap().hint(), "");
    }

    #[test]
    fn json_must_be_an_array() {
        assert!(matches!(
            WordCatalog::from_json_str(r#"{"word": "cat"}"#),
            Err(HangmanError::CatalogFormat(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"word": "river", "hint": "flows"}}]"#).unwrap();

        let catalog = WordCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.iter().next().unwrap().word(), "river");
    }

    #[test]
    fn load_missing_file_reports_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        match WordCatalog::load(&missing) {
            Err(HangmanError::CatalogIo { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected CatalogIo, got {other:?}"),
        }
    }

    #[test]
    fn pick_clamps_out_of_range_index() {
        let catalog = WordCatalog::new(vec![
            WordEntry::new("cat", "").unwrap(),
            WordEntry::new("dog", "").unwrap(),
        ]);
        assert_eq!(catalog.pick(&mut Fixed(2)).unwrap().word(), "dog");
        assert_eq!(catalog.pick(&mut Fixed(usize::MAX)).unwrap().word(), "dog");
        assert_eq!(catalog.pick(&mut Fixed(0)).unwrap().word(), "cat");
    }

    #[test]
    fn pick_from_empty_catalog() {
        assert!(WordCatalog::default().pick(&mut Fixed(0)).is_none());
    }
}
