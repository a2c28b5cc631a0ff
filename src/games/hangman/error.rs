use std::path::PathBuf;

/// Everything that can go wrong around a hangman round.
///
/// None of these are fatal to play: the engine degrades every one of them to
/// a no-op or to the fallback word, so there is always a playable round.
#[derive(Debug, thiserror::Error)]
pub enum HangmanError {
    #[error("word catalog is empty")]
    EmptyCatalog,

    #[error("invalid guess {0:?}: expected a single letter a-z")]
    InvalidGuessInput(String),

    #[error("the round is already over")]
    GuessAfterRoundEnd,

    #[error("invalid word {0:?}: expected ASCII letters only")]
    InvalidWord(String),

    #[error("inconsistent round snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("failed to read word catalog {}", path.display())]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed word catalog")]
    CatalogFormat(#[from] serde_json::Error),
}
