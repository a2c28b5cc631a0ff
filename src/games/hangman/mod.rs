/// Hangman: engine, word catalog and terminal presentation
pub mod art;
pub mod catalog;
pub mod error;
pub mod game;
pub mod random;
pub mod renderer;
pub mod view;

pub use catalog::{WordCatalog, WordEntry};
pub use error::HangmanError;
pub use game::{
    guess_letter, start_new_round, GuessOutcome, HangmanEngine, Letter, Round, RoundEnded,
    RoundState, RoundStatus, MAX_WRONG_GUESSES,
};
pub use random::{IndexSource, RandomIndex};
pub use renderer::HangmanRenderer;
pub use view::HangmanView;
