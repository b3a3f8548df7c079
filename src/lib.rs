//! # holdem_equity
//!
//! Texas Hold'em hand evaluation and equity calculation.
//!
//! `core` has cards, decks and the 5 to 7 card hand ranking. `holdem`
//! has ranges, scenarios and the two ways of working out how often each
//! player wins: Monte Carlo sampling and counting every possible deal.
//!
//! ```
//! use holdem_equity::holdem::{EquityQueryBuilder, SimulationConfig};
//!
//! let result = EquityQueryBuilder::default()
//!     .board_str("Th9h2c")
//!     .unwrap()
//!     .player_str("AhKh")
//!     .unwrap()
//!     .player_str("TT+, 99")
//!     .unwrap()
//!     .config(SimulationConfig::default().seed(420))
//!     .build()
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! // Small enough to count every turn and river.
//! assert!(result.exact);
//! println!("AhKh has {:.1}% equity", result.players[0].equity * 100.0);
//! ```

/// Allow all the core poker functionality to be used
/// externally. Everything in core should be agnostic
/// to poker style.
pub mod core;
/// Allow all the holdem specific code to be used externally.
pub mod holdem;
/// Small helpers shared by the rest of the crate.
pub mod utils;
