use std::fmt;

use crate::core::{Card, CardBitSet, PokerError};

use super::{RangeParser, StartingHand};

/// Two distinct hole cards, stored with the higher card first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoleCards {
    high: Card,
    low: Card,
}

impl HoleCards {
    /// Create hole cards from two cards. The same card twice is an error.
    ///
    /// ```
    /// use holdem_equity::core::Card;
    /// use holdem_equity::holdem::HoleCards;
    ///
    /// let two = Card::try_from("2c").unwrap();
    /// let ace = Card::try_from("As").unwrap();
    ///
    /// let hole = HoleCards::new(two, ace).unwrap();
    /// assert_eq!(ace, hole.high());
    /// assert!(HoleCards::new(ace, ace).is_err());
    /// ```
    pub fn new(a: Card, b: Card) -> Result<Self, PokerError> {
        if a == b {
            return Err(PokerError::DuplicateCardInHand(a));
        }
        Ok(Self::from_distinct(a, b))
    }

    /// Callers guarantee the two cards differ.
    pub(crate) fn from_distinct(a: Card, b: Card) -> Self {
        debug_assert_ne!(a, b);
        Self {
            high: a.max(b),
            low: a.min(b),
        }
    }

    pub fn high(&self) -> Card {
        self.high
    }

    pub fn low(&self) -> Card {
        self.low
    }

    /// Both cards as a set.
    pub fn cards(&self) -> CardBitSet {
        let mut set = CardBitSet::new();
        set.insert(self.high);
        set.insert(self.low);
        set
    }
}

impl TryFrom<&str> for HoleCards {
    type Error = PokerError;

    /// Parse exactly two cards, `"AsKs"`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        let split = value
            .char_indices()
            .nth(2)
            .map(|(i, _)| i)
            .ok_or(PokerError::UnexpectedSuitChar)?;
        let (first, second) = value.split_at(split);
        Self::new(Card::try_from(first)?, Card::try_from(second)?)
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)
    }
}

/// One candidate holding in a range and how likely it is.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedCombo {
    pub cards: HoleCards,
    pub weight: f64,
}

/// A weighted set of hole cards a player might hold.
///
/// Combos are drawn with probability proportional to their weight. Adding
/// a combo that's already present replaces its weight.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Range {
    combos: Vec<WeightedCombo>,
}

impl Range {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse range notation like `"QQ+, AKs, A5s-A2s:0.5"`.
    ///
    /// ```
    /// use holdem_equity::holdem::Range;
    ///
    /// let range = Range::parse("QQ+, AKs").unwrap();
    /// assert_eq!(3 * 6 + 4, range.len());
    /// ```
    pub fn parse(range_str: &str) -> Result<Self, PokerError> {
        RangeParser::parse(range_str)
    }

    /// Add or re-weight a single combo.
    pub fn insert(&mut self, cards: HoleCards, weight: f64) {
        match self.combos.iter_mut().find(|c| c.cards == cards) {
            Some(existing) => existing.weight = weight,
            None => self.combos.push(WeightedCombo { cards, weight }),
        }
    }

    /// Add every combo of a starting hand with the same weight.
    pub fn insert_starting_hand(&mut self, starting_hand: &StartingHand, weight: f64) {
        for cards in starting_hand.possible_hands() {
            self.insert(cards, weight);
        }
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeightedCombo> {
        self.combos.iter()
    }

    /// Sum of every weight.
    pub fn total_weight(&self) -> f64 {
        self.combos.iter().map(|c| c.weight).sum()
    }

    /// The combos that don't touch any of the `blocked` cards, keeping
    /// only those with a positive weight.
    pub fn without_blocked(&self, blocked: &CardBitSet) -> Vec<WeightedCombo> {
        self.combos
            .iter()
            .filter(|c| c.weight > 0.0 && c.cards.cards().is_disjoint(blocked))
            .copied()
            .collect()
    }
}

impl FromIterator<HoleCards> for Range {
    /// Every combo with weight one.
    fn from_iter<T: IntoIterator<Item = HoleCards>>(iter: T) -> Self {
        let mut range = Self::new();
        for cards in iter {
            range.insert(cards, 1.0);
        }
        range
    }
}

impl From<StartingHand> for Range {
    fn from(value: StartingHand) -> Self {
        value.possible_hands().into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Range {
    type Item = &'a WeightedCombo;
    type IntoIter = std::slice::Iter<'a, WeightedCombo>;

    fn into_iter(self) -> Self::IntoIter {
        self.combos.iter()
    }
}
