use rand::Rng;

use super::{Card, CardBitSet, CardBitSetIter, PokerError};

/// Deck struct that can tell quickly if a card is in the deck
///
/// It starts with all 52 cards. Known cards are removed and
/// random cards can be drawn from whatever remains.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck(CardBitSet);

impl Deck {
    /// Create a new empty deck
    ///
    /// ```
    /// use holdem_equity::core::Deck;
    ///
    /// let deck = Deck::new();
    ///
    /// assert!(deck.is_empty());
    /// assert_eq!(0, deck.len());
    /// ```
    pub fn new() -> Self {
        Self(CardBitSet::new())
    }

    /// The full deck minus the given cards.
    ///
    /// ```
    /// use holdem_equity::core::{CardBitSet, Deck, Hand};
    ///
    /// let known: CardBitSet = Hand::new_from_str("AsKsQhQd").unwrap().into();
    /// assert_eq!(48, Deck::without(&known).len());
    /// ```
    pub fn without(known: &CardBitSet) -> Self {
        Self(!*known)
    }

    /// Given a card, is it in the current deck?
    pub fn contains(&self, c: &Card) -> bool {
        self.0.contains(*c)
    }

    /// Given a card remove it from the deck if it is present.
    pub fn remove(&mut self, c: &Card) -> bool {
        let contains = self.contains(c);
        self.0.remove(*c);
        contains
    }

    /// Add a given card to the deck.
    pub fn insert(&mut self, c: Card) -> bool {
        let contains = self.contains(&c);
        self.0.insert(c);
        !contains
    }

    /// How many cards are there in the deck.
    pub fn len(&self) -> usize {
        self.0.count()
    }

    /// Have all of the cards been dealt from this deck?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get an iterator from this deck
    pub fn iter(&self) -> CardBitSetIter {
        self.0.into_iter()
    }

    /// Draw `n` cards uniformly at random without replacement.
    ///
    /// The drawn cards leave the deck. If there are fewer than `n` cards
    /// left nothing is removed and `InsufficientCards` is returned.
    ///
    /// ```
    /// use rand::{SeedableRng, rngs::StdRng};
    /// use holdem_equity::core::Deck;
    ///
    /// let mut rng = StdRng::seed_from_u64(420);
    /// let mut deck = Deck::default();
    /// let flop = deck.draw(3, &mut rng).unwrap();
    ///
    /// assert_eq!(3, flop.len());
    /// assert_eq!(49, deck.len());
    /// assert!(flop.iter().all(|c| !deck.contains(c)));
    /// assert!(deck.draw(50, &mut rng).is_err());
    /// ```
    pub fn draw<R: Rng>(&mut self, n: usize, rng: &mut R) -> Result<Vec<Card>, PokerError> {
        let mut drawn = CardBitSet::new();
        self.deal_into(n, rng, &mut drawn)?;
        Ok(drawn.into_iter().collect())
    }

    /// Same as `draw` but the cards are added to an existing set. This
    /// is what the simulation loop uses so no allocation happens.
    pub fn deal_into<R: Rng>(
        &mut self,
        n: usize,
        rng: &mut R,
        into: &mut CardBitSet,
    ) -> Result<(), PokerError> {
        let available = self.len();
        if n > available {
            return Err(PokerError::InsufficientCards {
                requested: n,
                available,
            });
        }
        for _ in 0..n {
            // Can't be empty, the length was checked above.
            if let Some(card) = self.0.sample_one(rng) {
                self.0.remove(card);
                into.insert(card);
            }
        }
        Ok(())
    }
}

impl Default for Deck {
    /// Create the default 52 card deck
    ///
    /// ```
    /// use holdem_equity::core::Deck;
    ///
    /// assert_eq!(52, Deck::default().len());
    /// ```
    fn default() -> Self {
        Self(CardBitSet::default())
    }
}

impl From<CardBitSet> for Deck {
    fn from(value: CardBitSet) -> Self {
        Self(value)
    }
}

impl From<Deck> for CardBitSet {
    fn from(value: Deck) -> Self {
        value.0
    }
}

/// Turn a deck into an iterator
impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = CardBitSetIter;
    /// Consume this deck and create a new iterator.
    fn into_iter(self) -> CardBitSetIter {
        self.0.into_iter()
    }
}
