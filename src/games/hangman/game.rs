use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::catalog::{normalize_word, WordCatalog, WordEntry};
use super::error::HangmanError;
use super::random::{IndexSource, RandomIndex};

/// Wrong guesses allowed before the round is lost.
pub const MAX_WRONG_GUESSES: u8 = 6;

/// A single lowercase ASCII letter, the only thing a round accepts as a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(char);

impl Letter {
    /// Case-insensitive; anything outside `a-z`/`A-Z` is rejected.
    pub fn new(c: char) -> Result<Self, HangmanError> {
        if c.is_ascii_alphabetic() {
            Ok(Self(c.to_ascii_lowercase()))
        } else {
            Err(HangmanError::InvalidGuessInput(c.to_string()))
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Letter {
    type Error = HangmanError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::new(c)
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> Self {
        letter.0
    }
}

impl FromStr for Letter {
    type Err = HangmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::new(c).map_err(|_| HangmanError::InvalidGuessInput(s.to_string()))
            }
            _ => Err(HangmanError::InvalidGuessInput(s.to_string())),
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

/// Mutable state of the round being played.
///
/// Deserialized snapshots go through [`RawRoundState`] and are rejected
/// unless they satisfy the same invariants `guess_letter` maintains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRoundState")]
pub struct RoundState {
    secret_word: String,
    revealed_letters: BTreeSet<char>,
    guessed_chars: BTreeSet<char>,
    wrong_guess_count: u8,
    max_wrong_guesses: u8,
    status: RoundStatus,
}

impl RoundState {
    /// Fresh round over `word`, which must be ASCII letters (any case).
    pub fn new(word: &str) -> Result<Self, HangmanError> {
        Ok(Self::fresh(normalize_word(word)?))
    }

    fn fresh(secret_word: String) -> Self {
        Self {
            secret_word,
            revealed_letters: BTreeSet::new(),
            guessed_chars: BTreeSet::new(),
            wrong_guess_count: 0,
            max_wrong_guesses: MAX_WRONG_GUESSES,
            status: RoundStatus::InProgress,
        }
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn revealed_letters(&self) -> &BTreeSet<char> {
        &self.revealed_letters
    }

    pub fn guessed_chars(&self) -> &BTreeSet<char> {
        &self.guessed_chars
    }

    pub fn wrong_guess_count(&self) -> u8 {
        self.wrong_guess_count
    }

    pub fn max_wrong_guesses(&self) -> u8 {
        self.max_wrong_guesses
    }

    pub fn remaining_attempts(&self) -> u8 {
        self.max_wrong_guesses.saturating_sub(self.wrong_guess_count)
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != RoundStatus::InProgress
    }

    pub fn is_guessed(&self, letter: Letter) -> bool {
        self.guessed_chars.contains(&letter.as_char())
    }

    /// Guessed letters that are not in the word, in alphabetical order.
    pub fn wrong_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.guessed_chars
            .iter()
            .copied()
            .filter(|c| !self.revealed_letters.contains(c))
    }

    /// One slot per character of the word: `Some` once revealed.
    pub fn masked_word(&self) -> Vec<Option<char>> {
        self.secret_word
            .chars()
            .map(|c| self.revealed_letters.contains(&c).then_some(c))
            .collect()
    }

    fn is_word_complete(&self) -> bool {
        self.secret_word
            .chars()
            .all(|c| self.revealed_letters.contains(&c))
    }

    fn round_ended(&self) -> Option<RoundEnded> {
        match self.status {
            RoundStatus::InProgress => None,
            RoundStatus::Won | RoundStatus::Lost => Some(RoundEnded {
                is_victory: self.status == RoundStatus::Won,
                secret_word: self.secret_word.clone(),
            }),
        }
    }
}

/// Unchecked wire form of [`RoundState`].
#[derive(Debug, Deserialize)]
struct RawRoundState {
    secret_word: String,
    revealed_letters: BTreeSet<char>,
    guessed_chars: BTreeSet<char>,
    wrong_guess_count: u8,
    max_wrong_guesses: u8,
    status: RoundStatus,
}

impl TryFrom<RawRoundState> for RoundState {
    type Error = HangmanError;

    fn try_from(raw: RawRoundState) -> Result<Self, Self::Error> {
        let invalid = |reason: &str| Err(HangmanError::InvalidSnapshot(reason.to_string()));

        if normalize_word(&raw.secret_word)? != raw.secret_word {
            return invalid("secret word must be lowercase letters");
        }
        if raw.max_wrong_guesses != MAX_WRONG_GUESSES {
            return invalid("unexpected wrong-guess limit");
        }
        if !raw.guessed_chars.iter().all(|c| c.is_ascii_lowercase()) {
            return invalid("guessed characters must be lowercase letters");
        }

        let hits: BTreeSet<char> = raw
            .guessed_chars
            .iter()
            .copied()
            .filter(|c| raw.secret_word.contains(*c))
            .collect();
        if hits != raw.revealed_letters {
            return invalid("revealed letters disagree with guesses");
        }

        let misses = raw.guessed_chars.len() - hits.len();
        if usize::from(raw.wrong_guess_count) != misses
            || raw.wrong_guess_count > raw.max_wrong_guesses
        {
            return invalid("wrong-guess count disagrees with guesses");
        }

        let state = Self {
            secret_word: raw.secret_word,
            revealed_letters: raw.revealed_letters,
            guessed_chars: raw.guessed_chars,
            wrong_guess_count: raw.wrong_guess_count,
            max_wrong_guesses: raw.max_wrong_guesses,
            status: RoundStatus::InProgress,
        };
        let expected = if state.is_word_complete() {
            RoundStatus::Won
        } else if state.wrong_guess_count == state.max_wrong_guesses {
            RoundStatus::Lost
        } else {
            RoundStatus::InProgress
        };
        if expected != raw.status {
            return invalid("status disagrees with guesses");
        }

        Ok(Self { status: expected, ..state })
    }
}

/// Payload attached to the guess that finished a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEnded {
    pub is_victory: bool,
    pub secret_word: String,
}

/// Result of a single guess. Exactly one variant per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    Correct {
        letter: Letter,
        positions: Vec<usize>,
        round_ended: Option<RoundEnded>,
    },
    Wrong {
        letter: Letter,
        wrong_guess_count: u8,
        round_ended: Option<RoundEnded>,
    },
    AlreadyGuessed(Letter),
    AlreadyOver,
}

impl GuessOutcome {
    pub fn round_ended(&self) -> Option<&RoundEnded> {
        match self {
            GuessOutcome::Correct { round_ended, .. } | GuessOutcome::Wrong { round_ended, .. } => {
                round_ended.as_ref()
            }
            GuessOutcome::AlreadyGuessed(_) | GuessOutcome::AlreadyOver => None,
        }
    }
}

/// Applies one guess to `state`.
///
/// All mutation happens before the outcome is built. A correct guess can
/// only win the round and a wrong one can only lose it.
pub fn guess_letter(state: &mut RoundState, letter: Letter) -> GuessOutcome {
    if state.is_over() {
        return GuessOutcome::AlreadyOver;
    }

    let c = letter.as_char();
    if !state.guessed_chars.insert(c) {
        return GuessOutcome::AlreadyGuessed(letter);
    }

    let positions: Vec<usize> = state
        .secret_word
        .char_indices()
        .filter_map(|(i, w)| (w == c).then_some(i))
        .collect();

    if !positions.is_empty() {
        state.revealed_letters.insert(c);
        if state.is_word_complete() {
            state.status = RoundStatus::Won;
        }
        GuessOutcome::Correct {
            letter,
            positions,
            round_ended: state.round_ended(),
        }
    } else {
        state.wrong_guess_count = state
            .wrong_guess_count
            .saturating_add(1)
            .min(state.max_wrong_guesses);
        if state.wrong_guess_count == state.max_wrong_guesses {
            state.status = RoundStatus::Lost;
        }
        GuessOutcome::Wrong {
            letter,
            wrong_guess_count: state.wrong_guess_count,
            round_ended: state.round_ended(),
        }
    }
}

/// A round together with the hint shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub state: RoundState,
    pub hint: String,
}

/// Draws a word from `catalog` and builds a fresh round for it.
///
/// An empty catalog is not an error for the player: the fallback word is
/// used and the condition is only logged.
pub fn start_new_round(catalog: &WordCatalog, source: &mut impl IndexSource) -> Round {
    let entry = match catalog.pick(source) {
        Some(entry) => entry.clone(),
        None => {
            warn!(error = %HangmanError::EmptyCatalog, "using fallback word");
            WordEntry::fallback()
        }
    };

    Round {
        state: RoundState::fresh(entry.word().to_string()),
        hint: entry.hint().to_string(),
    }
}

/// Owns the catalog, the index source and the round currently in play.
pub struct HangmanEngine<S: IndexSource = RandomIndex> {
    catalog: WordCatalog,
    source: S,
    round: Round,
    rounds_started: u64,
}

impl<S: IndexSource> HangmanEngine<S> {
    /// Builds the engine and starts its first round.
    pub fn new(catalog: WordCatalog, mut source: S) -> Self {
        let round = start_new_round(&catalog, &mut source);
        info!(letters = round.state.secret_word.len(), "round 1 started");
        Self {
            catalog,
            source,
            round,
            rounds_started: 1,
        }
    }

    /// Replaces the current round wholesale with a newly drawn one.
    pub fn start_new_round(&mut self) -> &Round {
        self.round = start_new_round(&self.catalog, &mut self.source);
        self.rounds_started += 1;
        info!(
            round = self.rounds_started,
            letters = self.round.state.secret_word.len(),
            "round started"
        );
        &self.round
    }

    pub fn guess(&mut self, letter: Letter) -> GuessOutcome {
        let outcome = guess_letter(&mut self.round.state, letter);

        match &outcome {
            GuessOutcome::AlreadyOver => {
                debug!(%letter, reason = %HangmanError::GuessAfterRoundEnd, "guess ignored");
            }
            GuessOutcome::AlreadyGuessed(_) => debug!(%letter, "letter already guessed"),
            GuessOutcome::Correct { positions, .. } => debug!(%letter, ?positions, "correct guess"),
            GuessOutcome::Wrong { wrong_guess_count, .. } => {
                debug!(%letter, wrong_guess_count, "wrong guess")
            }
        }
        if let Some(ended) = outcome.round_ended() {
            info!(
                round = self.rounds_started,
                victory = ended.is_victory,
                wrong = self.round.state.wrong_guess_count,
                "round ended"
            );
        }

        outcome
    }

    /// Boundary entry point for raw text input. Invalid input mutates nothing.
    pub fn guess_input(&mut self, input: &str) -> Result<GuessOutcome, HangmanError> {
        let letter: Letter = input.parse()?;
        Ok(self.guess(letter))
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn state(&self) -> &RoundState {
        &self.round.state
    }

    pub fn hint(&self) -> &str {
        &self.round.hint
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    pub fn rounds_started(&self) -> u64 {
        self.rounds_started
    }
}
