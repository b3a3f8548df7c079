use std::collections::HashSet;

use crate::core::{Card, CardBitSet, PokerError};

use super::{EquityError, HoleCards, Range, ScenarioError};

/// What is known about one player's hole cards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerHand {
    /// The exact two cards.
    Exact(HoleCards),
    /// A weighted guess.
    Range(Range),
}

impl PlayerHand {
    /// The hole cards if they are known exactly.
    pub fn exact(&self) -> Option<HoleCards> {
        match self {
            Self::Exact(h) => Some(*h),
            Self::Range(_) => None,
        }
    }
}

impl From<HoleCards> for PlayerHand {
    fn from(value: HoleCards) -> Self {
        Self::Exact(value)
    }
}

impl From<Range> for PlayerHand {
    fn from(value: Range) -> Self {
        Self::Range(value)
    }
}

impl TryFrom<&str> for PlayerHand {
    type Error = PokerError;

    /// Two exact cards (`"AsKs"`) become `Exact`, anything else is parsed
    /// as range notation.
    ///
    /// ```
    /// use holdem_equity::holdem::PlayerHand;
    ///
    /// assert!(PlayerHand::try_from("AsKs").unwrap().exact().is_some());
    /// assert!(PlayerHand::try_from("QQ+, AKs").unwrap().exact().is_none());
    /// ```
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match HoleCards::try_from(value) {
            Ok(h) => Ok(Self::Exact(h)),
            Err(_) => Ok(Self::Range(Range::parse(value)?)),
        }
    }
}

/// A spot to compute equity for: the community cards so far, every
/// player's hand and any cards known to be out of play.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub board: Vec<Card>,
    pub players: Vec<PlayerHand>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dead: Vec<Card>,
}

impl Scenario {
    pub fn new(board: Vec<Card>, players: Vec<PlayerHand>, dead: Vec<Card>) -> Self {
        Self {
            board,
            players,
            dead,
        }
    }

    /// How many board cards are still to come.
    pub fn board_needed(&self) -> usize {
        5usize.saturating_sub(self.board.len())
    }

    /// Board, dead cards and every exactly known hole card.
    pub fn known_cards(&self) -> CardBitSet {
        let mut known: CardBitSet = self.board.iter().chain(self.dead.iter()).copied().collect();
        for p in &self.players {
            if let PlayerHand::Exact(h) = p {
                known |= h.cards();
            }
        }
        known
    }

    /// Cards that still have to come out of the deck each deal, the rest
    /// of the board plus two for every player on a range.
    pub fn cards_to_deal(&self) -> usize {
        let ranged = self
            .players
            .iter()
            .filter(|p| matches!(p, PlayerHand::Range(_)))
            .count();
        self.board_needed() + 2 * ranged
    }

    /// Check that this scenario makes sense before simulating it.
    ///
    /// Structural problems come back as `InvalidScenario`. A scenario that
    /// would need more than 52 cards is `InsufficientCards`.
    ///
    /// ```
    /// use holdem_equity::holdem::{EquityError, PlayerHand, Scenario, ScenarioError};
    ///
    /// let scenario = Scenario::new(
    ///     vec![],
    ///     vec![
    ///         PlayerHand::try_from("AsKs").unwrap(),
    ///         PlayerHand::try_from("AsQs").unwrap(),
    ///     ],
    ///     vec![],
    /// );
    /// assert!(matches!(
    ///     scenario.validate(),
    ///     Err(EquityError::InvalidScenario(ScenarioError::DuplicateCard(_)))
    /// ));
    /// ```
    pub fn validate(&self) -> Result<(), EquityError> {
        if self.players.is_empty() {
            return Err(ScenarioError::NoPlayers.into());
        }
        if self.board.len() > 5 {
            return Err(ScenarioError::TooManyBoardCards(self.board.len()).into());
        }

        for (player, hand) in self.players.iter().enumerate() {
            if let PlayerHand::Exact(h) = hand {
                if h.high() == h.low() {
                    return Err(ScenarioError::InvalidHoleCards { player }.into());
                }
            }
        }

        let exact = self.players.iter().filter_map(PlayerHand::exact);
        let mut seen = CardBitSet::new();
        let known = self
            .board
            .iter()
            .chain(self.dead.iter())
            .copied()
            .chain(exact.flat_map(|h| [h.high(), h.low()]));
        for card in known {
            if seen.contains(card) {
                return Err(ScenarioError::DuplicateCard(card).into());
            }
            seen.insert(card);
        }

        for (player, hand) in self.players.iter().enumerate() {
            if let PlayerHand::Range(range) = hand {
                Self::validate_range(player, range)?;
            }
        }

        let needed = self.cards_to_deal();
        let available = 52 - seen.count();
        if needed > available {
            return Err(PokerError::InsufficientCards {
                requested: needed,
                available,
            }
            .into());
        }
        Ok(())
    }

    fn validate_range(player: usize, range: &Range) -> Result<(), ScenarioError> {
        let mut combos = HashSet::with_capacity(range.len());
        let mut any_positive = false;
        for combo in range {
            if !combo.weight.is_finite() || combo.weight < 0.0 {
                return Err(ScenarioError::InvalidWeight {
                    player,
                    weight: combo.weight,
                });
            }
            if !combos.insert(combo.cards) {
                return Err(ScenarioError::DuplicateCombo {
                    player,
                    cards: combo.cards,
                });
            }
            any_positive |= combo.weight > 0.0;
        }
        if !any_positive {
            return Err(ScenarioError::EmptyRange { player });
        }
        Ok(())
    }
}
