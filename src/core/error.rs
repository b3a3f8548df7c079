use thiserror::Error;

use super::Card;

/// This is the core error type for the library. It uses `thiserror` to
/// provide readable error messages
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PokerError {
    #[error("Unable to parse value")]
    UnexpectedValueChar,
    #[error("Unable to parse suit")]
    UnexpectedSuitChar,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("Card already added to hand {0}")]
    DuplicateCardInHand(Card),
    #[error("Hands must have between 5 and 7 cards to be ranked, found {0}")]
    InvalidHandSize(usize),
    #[error("Asked to draw {requested} cards but only {available} remain")]
    InsufficientCards { requested: usize, available: usize },
    #[error("Unable to parse range item {0:?}")]
    InvalidRangeItem(String),
    #[error("Invalid use of the plus modifier")]
    InvalidPlusModifier,
    #[error("The gap between cards must be constant when defining a hand range.")]
    InvalidGap,
    #[error("Pairs can't be suited.")]
    InvalidSuitedPairs,
    #[error("Range weights must be finite and non-negative, got {0}")]
    InvalidWeight(f64),
}
