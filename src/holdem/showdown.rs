use std::cmp::Ordering;

use crate::core::{Card, CardBitSet, PokerError, Rank, rank_cards};
use crate::utils::PlayerBitSet;

use super::{EquityError, HoleCards, ScenarioError};

/// Find who takes the pot on a complete board.
///
/// Returns every player holding the best hand (more than one on a split)
/// along with that hand's rank.
///
/// ```
/// use holdem_equity::core::{Hand, Rank};
/// use holdem_equity::holdem::{HoleCards, showdown};
///
/// let board: Vec<_> = Hand::new_from_str("2c7d9hTsJs").unwrap().iter().collect();
/// let holes = [
///     HoleCards::try_from("AsKs").unwrap(),
///     HoleCards::try_from("QhQd").unwrap(),
/// ];
/// let (winners, rank) = showdown(&board, &holes).unwrap();
///
/// assert!(winners.get(1));
/// assert_eq!(1, winners.count());
/// assert!(matches!(rank, Rank::OnePair(_)));
/// ```
pub fn showdown(board: &[Card], holes: &[HoleCards]) -> Result<(PlayerBitSet, Rank), EquityError> {
    if holes.is_empty() {
        return Err(ScenarioError::NoPlayers.into());
    }
    if board.len() != 5 {
        return Err(PokerError::InvalidHandSize(board.len() + 2).into());
    }

    let mut used = CardBitSet::new();
    let all = board
        .iter()
        .copied()
        .chain(holes.iter().flat_map(|h| [h.high(), h.low()]));
    for card in all {
        if used.contains(card) {
            return Err(ScenarioError::DuplicateCard(card).into());
        }
        used.insert(card);
    }

    let board: CardBitSet = board.iter().copied().collect();
    let holes: Vec<CardBitSet> = holes.iter().map(HoleCards::cards).collect();
    Ok(winners(&holes, board))
}

/// Rank every hole against the board and keep the best. Nothing is
/// checked, callers make sure the cards are disjoint.
pub(crate) fn winners(holes: &[CardBitSet], board: CardBitSet) -> (PlayerBitSet, Rank) {
    holes.iter().map(|h| rank_cards(*h | board)).enumerate().fold(
        (PlayerBitSet::default(), Rank::HighCard(0)),
        |(mut found, max_rank), (idx, rank)| match rank.cmp(&max_rank) {
            Ordering::Equal => {
                // A tie so far, add this player.
                found.enable(idx);
                (found, rank)
            }
            Ordering::Greater => {
                // New best hand, it's the only winner for now.
                found = PlayerBitSet::default();
                found.enable(idx);
                (found, rank)
            }
            Ordering::Less => (found, max_rank),
        },
    )
}
