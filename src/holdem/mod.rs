//! Everything specific to Texas Hold'em: starting hands and ranges,
//! scenarios, and the equity simulators.

/// Module that can generate possible cards for a starting hand.
mod starting_hand;
/// Export `StartingHand`
pub use self::starting_hand::{StartingHand, Suitedness};

/// Module with all the starting hand parsing code.
mod parse;
/// Export `RangeParser`
pub use self::parse::RangeParser;

/// Hole cards and weighted ranges of them.
mod range;
pub use self::range::{HoleCards, Range, WeightedCombo};

mod error;
pub use self::error::{EquityError, ScenarioError};

/// The board, the players and the dead cards.
mod scenario;
pub use self::scenario::{PlayerHand, Scenario};

/// Deals random hands out of ranges.
mod range_sampler;
pub use self::range_sampler::{Deal, RangeSampler};

mod tally;

/// Who wins on a complete board.
mod showdown;
pub use self::showdown::showdown;

/// Cancellation and the rayon plumbing.
mod workers;
pub use self::workers::CancelToken;

/// Module for `MonteCarloGame` that plays random deals to the river.
mod monte_carlo_game;
/// Export `MonteCarloGame`
pub use self::monte_carlo_game::MonteCarloGame;

/// Counting every possible deal.
mod exhaustive;

mod config;
pub use self::config::{ModeSelection, SimulationConfig};

mod equity_result;
pub use self::equity_result::{EquityResult, EvaluationMode, PlayerEquity};

/// The public entry point for equity questions.
mod query;
pub use self::query::{EquityQuery, EquityQueryBuilder};
