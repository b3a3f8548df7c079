use crate::core::{Card, Suit, Value};

use super::HoleCards;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suitedness {
    Suited,
    OffSuit,
    Any,
}

/// `StartingHand` represents the two card starting hand of texas holdem.
/// It can generate all the possible actual starting hands.
///
/// Give two values and if you only want suited variants.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartingHand {
    /// The first value.
    value_one: Value,
    /// The second value.
    value_two: Value,
    /// should we only consider possible starting hands of the same suit?
    suited: Suitedness,
}

impl StartingHand {
    /// Create a starting hand. The higher value always ends up first.
    pub fn new(value_one: Value, value_two: Value, suited: Suitedness) -> Self {
        Self {
            value_one: value_one.max(value_two),
            value_two: value_one.min(value_two),
            suited,
        }
    }

    /// Create the starting hand for a pocket pair
    pub fn pair(value: Value) -> Self {
        Self::new(value, value, Suitedness::OffSuit)
    }

    pub fn value_one(&self) -> Value {
        self.value_one
    }

    pub fn value_two(&self) -> Value {
        self.value_two
    }

    pub fn suited(&self) -> Suitedness {
        self.suited
    }

    pub fn is_pair(&self) -> bool {
        self.value_one == self.value_two
    }

    fn create_suited(&self) -> Vec<HoleCards> {
        // Can't have a suited pair. Not unless you're cheating.
        if self.is_pair() {
            return vec![];
        }
        Suit::suits()
            .iter()
            .map(|s| {
                HoleCards::from_distinct(
                    Card::new(self.value_one, *s),
                    Card::new(self.value_two, *s),
                )
            })
            .collect()
    }

    fn create_offsuit(&self) -> Vec<HoleCards> {
        // Since the values are the same there is no reason to swap the suits.
        let expected_hands = if self.is_pair() { 6 } else { 12 };
        self.append_offsuit(Vec::with_capacity(expected_hands))
    }

    fn append_offsuit(&self, mut hands: Vec<HoleCards>) -> Vec<HoleCards> {
        let suits = Suit::suits();
        for (i, suit_one) in suits.iter().enumerate() {
            for suit_two in &suits[i + 1..] {
                hands.push(HoleCards::from_distinct(
                    Card::new(self.value_one, *suit_one),
                    Card::new(self.value_two, *suit_two),
                ));

                // If this isn't a pair then the flipped suits is needed.
                if !self.is_pair() {
                    hands.push(HoleCards::from_distinct(
                        Card::new(self.value_one, *suit_two),
                        Card::new(self.value_two, *suit_one),
                    ));
                }
            }
        }
        hands
    }

    /// Get all the possible starting hands represented by the
    /// two values of this starting hand.
    ///
    /// ```
    /// use holdem_equity::core::Value;
    /// use holdem_equity::holdem::{StartingHand, Suitedness};
    ///
    /// let aks = StartingHand::new(Value::Ace, Value::King, Suitedness::Suited);
    /// assert_eq!(4, aks.possible_hands().len());
    /// ```
    pub fn possible_hands(&self) -> Vec<HoleCards> {
        match self.suited {
            Suitedness::Suited => self.create_suited(),
            Suitedness::OffSuit => self.create_offsuit(),
            Suitedness::Any => self.append_offsuit(self.create_suited()),
        }
    }

    /// Create every possible unique StartingHand.
    pub fn all() -> Vec<StartingHand> {
        let mut hands = Vec::with_capacity(169);
        let values = Value::values();
        for (i, value_one) in values.iter().enumerate() {
            for value_two in &values[i..] {
                hands.push(StartingHand::new(*value_one, *value_two, Suitedness::OffSuit));
                if value_one != value_two {
                    hands.push(StartingHand::new(*value_one, *value_two, Suitedness::Suited));
                }
            }
        }
        hands
    }
}
