//! This is the core module. It exports the non-holdem
//! related code.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, FULL_DECK, Suit, Value};

/// Errors shared by everything in core.
mod error;
pub use self::error::PokerError;

/// A compact set of cards.
mod card_bit_set;
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// Code related to cards in hands.
mod hand;
/// Everything in there should be public.
pub use self::hand::*;

/// We want to be able to iterate over every combination of some cards.
mod card_iter;
/// Make that functionality public.
pub use self::card_iter::*;

/// Deck is the normal 52 card deck.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// 5 to 7 Card hand ranking code.
mod rank;
/// Export the trait and the results.
pub use self::rank::{HandCategory, Rank, Rankable, best_rank_by_combinations, rank_cards};
