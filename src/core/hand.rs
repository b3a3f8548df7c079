use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr};

use super::{Card, CardBitSet, CardBitSetIter, PokerError, Suit, Value};

/// A set of distinct cards. Hole cards, a board, or both put together.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Hand(CardBitSet);

impl Hand {
    /// Create a new empty hand
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::Hand;
    ///
    /// let hand = Hand::new();
    ///
    /// assert!(hand.is_empty());
    /// ```
    pub fn new() -> Self {
        Self(CardBitSet::new())
    }

    pub fn new_with_cards(cards: Vec<Card>) -> Self {
        Self(cards.into_iter().collect())
    }

    /// Given a card, is it in the current hand?
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_equity::core::{Card, Hand, Suit, Value};
    ///
    /// let mut hand = Hand::new();
    ///
    /// let card = Card::new(Value::Ace, Suit::Club);
    /// assert!(!hand.contains(&card));
    ///
    /// hand.insert(card);
    /// assert!(hand.contains(&card));
    /// ```
    pub fn contains(&self, c: &Card) -> bool {
        self.0.contains(*c)
    }

    /// Remove a card from the hand, returning if it was there.
    pub fn remove(&mut self, c: &Card) -> bool {
        let contains = self.contains(c);
        self.0.remove(*c);
        contains
    }

    /// Add a card, returning false if it was already in the hand.
    pub fn insert(&mut self, c: Card) -> bool {
        let contains = self.contains(&c);
        self.0.insert(c);
        !contains
    }

    pub fn count(&self) -> usize {
        self.0.count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> CardBitSetIter {
        self.0.into_iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Parse a string of two character cards, `"AsKs"`, into a hand.
    ///
    /// Whitespace between cards is skipped. A card appearing twice is an
    /// error.
    ///
    /// ```
    /// use holdem_equity::core::{Hand, PokerError};
    ///
    /// let hand = Hand::new_from_str("Ad 8h 9c").unwrap();
    /// assert_eq!(3, hand.count());
    ///
    /// assert!(matches!(
    ///     Hand::new_from_str("AdAd"),
    ///     Err(PokerError::DuplicateCardInHand(_))
    /// ));
    /// ```
    pub fn new_from_str(hand_string: &str) -> Result<Self, PokerError> {
        let mut chars = hand_string.chars().filter(|c| !c.is_whitespace());
        let mut bitset = CardBitSet::new();

        // Keep looping until we explicitly break
        while let Some(vc) = chars.next() {
            let v = Value::from_char(vc).ok_or(PokerError::UnexpectedValueChar)?;
            let s = chars
                .next()
                .and_then(Suit::from_char)
                .ok_or(PokerError::UnexpectedSuitChar)?;

            let c = Card { value: v, suit: s };

            if bitset.contains(c) {
                return Err(PokerError::DuplicateCardInHand(c));
            }
            bitset.insert(c);
        }

        Ok(Self(bitset))
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self(CardBitSet::new())
    }
}

impl Extend<Card> for Hand {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        for card in iter {
            self.insert(card);
        }
    }
}

impl BitAnd for Hand {
    type Output = Hand;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Hand {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Hand {
    type Output = Hand;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl From<Hand> for CardBitSet {
    fn from(val: Hand) -> Self {
        val.0
    }
}

impl From<CardBitSet> for Hand {
    fn from(val: CardBitSet) -> Self {
        Self(val)
    }
}

/// Cards are printed highest first, `AsKs`.
impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cards: Vec<Card> = self.iter().collect();
        cards.reverse();
        for c in cards {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert() {
        let mut hand = Hand::new();
        for i in 1..7 {
            let c = Card::from(i);
            assert!(hand.insert(c));
            assert!(hand.contains(&c));
            assert_eq!(hand.count(), usize::from(i));
        }
        assert!(!hand.insert(Card::from(1)));
    }

    #[test]
    fn test_is_empty() {
        let mut hand = Hand::new();
        assert!(hand.is_empty());

        hand.insert(Card::from(1));
        assert!(!hand.is_empty());
        hand.clear();

        assert!(hand.is_empty());
        hand.insert(Card::from(2));
        assert!(!hand.is_empty());
    }

    #[test]
    fn test_bit_and() {
        let mut hand1 = Hand::new();
        let mut hand2 = Hand::new();

        for i in 1..7 {
            hand1.insert(Card::from(i));
        }

        for i in 4..10 {
            hand2.insert(Card::from(i));
        }
        let hand3 = hand1 & hand2;
        assert_eq!(hand3.count(), 3);
        for i in 4..7 {
            assert!(hand3.contains(&Card::from(i)));
        }
        for i in 1..4 {
            assert!(!hand3.contains(&Card::from(i)));
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Err(PokerError::UnexpectedValueChar),
            Hand::new_from_str("Xs")
        );
        assert_eq!(Err(PokerError::UnexpectedSuitChar), Hand::new_from_str("A"));
        assert_eq!(
            Err(PokerError::UnexpectedSuitChar),
            Hand::new_from_str("Ax")
        );
    }

    #[test]
    fn test_display_high_first() {
        let hand = Hand::new_from_str("2cAs").unwrap();
        assert_eq!("As2c", hand.to_string());
    }
}
