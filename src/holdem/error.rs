use thiserror::Error;

use crate::core::{Card, PokerError};

use super::HoleCards;

/// Reasons a scenario is rejected before anything is simulated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("A scenario needs at least one player")]
    NoPlayers,
    #[error("The board can have at most 5 cards, found {0}")]
    TooManyBoardCards(usize),
    #[error("Player {player} must hold two different cards")]
    InvalidHoleCards { player: usize },
    #[error("Card {0} is used more than once")]
    DuplicateCard(Card),
    #[error("Player {player} has no hands with a positive weight in their range")]
    EmptyRange { player: usize },
    #[error("Player {player} has an invalid range weight {weight}")]
    InvalidWeight { player: usize, weight: f64 },
    #[error("Player {player} lists {cards} more than once")]
    DuplicateCombo { player: usize, cards: HoleCards },
    #[error("At least one trial is needed")]
    ZeroTrials,
    #[error("Batch size must be greater than zero")]
    ZeroBatchSize,
}

/// Everything that can go wrong answering an equity query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EquityError {
    #[error("Invalid scenario: {0}")]
    InvalidScenario(#[from] ScenarioError),
    #[error(transparent)]
    Poker(#[from] PokerError),
    #[error(
        "No hand in player {player}'s range fits the cards already dealt \
         ({completed_trials} trials completed)"
    )]
    RangeExhausted { player: usize, completed_trials: u64 },
    #[error("Unable to start worker threads: {0}")]
    ThreadPool(String),
}
