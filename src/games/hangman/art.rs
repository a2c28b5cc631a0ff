use super::game::MAX_WRONG_GUESSES;

/// Gallows drawings, one per wrong-guess count from 0 to 6.
const STAGES: [&str; MAX_WRONG_GUESSES as usize + 1] = [
    "  +---+\n  |   |\n      |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n  |   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n / \\  |\n      |\n=========",
];

/// Drawing for `wrong_guess_count`, saturating at the final stage.
pub fn stage(wrong_guess_count: u8) -> &'static str {
    let index = usize::from(wrong_guess_count).min(STAGES.len() - 1);
    STAGES[index]
}
