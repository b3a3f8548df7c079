use std::fmt;

use super::{Card, CardBitSet, CardIter, Hand, PokerError};

/// All the different possible hand ranks.
/// For each hand rank the u32 corresponds to
/// the strength of the hand in comparison to others
/// of the same rank.
///
/// The payload is built from value bitsets (bit 0 is a deuce, bit 12 an
/// ace). The cards that make the category (the pair, the trips) sit
/// above bit 13 and the kickers below, so a plain integer compare orders
/// hands of the same category.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    /// The lowest rank.
    /// No matches
    HighCard(u32),
    /// One Card matches another.
    OnePair(u32),
    /// Two different pair of matching cards.
    TwoPair(u32),
    /// Three of the same value.
    ThreeOfAKind(u32),
    /// Five cards in a sequence
    Straight(u32),
    /// Five cards of the same suit
    Flush(u32),
    /// Three of one value and two of another value
    FullHouse(u32),
    /// Four of the same value.
    FourOfAKind(u32),
    /// Five cards in a sequence all for the same suit.
    StraightFlush(u32),
}

/// The category of a hand without any of the kicker information.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Bits below this hold the payload in `Rank::strength`.
const CATEGORY_SHIFT: u32 = 26;

impl Rank {
    /// Which category of hand this is.
    pub fn category(&self) -> HandCategory {
        match self {
            Self::HighCard(_) => HandCategory::HighCard,
            Self::OnePair(_) => HandCategory::OnePair,
            Self::TwoPair(_) => HandCategory::TwoPair,
            Self::ThreeOfAKind(_) => HandCategory::ThreeOfAKind,
            Self::Straight(_) => HandCategory::Straight,
            Self::Flush(_) => HandCategory::Flush,
            Self::FullHouse(_) => HandCategory::FullHouse,
            Self::FourOfAKind(_) => HandCategory::FourOfAKind,
            Self::StraightFlush(_) => HandCategory::StraightFlush,
        }
    }

    fn payload(&self) -> u32 {
        match *self {
            Self::HighCard(v)
            | Self::OnePair(v)
            | Self::TwoPair(v)
            | Self::ThreeOfAKind(v)
            | Self::Straight(v)
            | Self::Flush(v)
            | Self::FullHouse(v)
            | Self::FourOfAKind(v)
            | Self::StraightFlush(v) => v,
        }
    }

    /// The whole rank packed into one integer. Comparing two strengths
    /// gives the same answer as comparing the two ranks.
    ///
    /// ```
    /// use holdem_equity::core::{Hand, Rankable};
    ///
    /// let quads = Hand::new_from_str("AsAcAhAdKs").unwrap().rank().unwrap();
    /// let flush = Hand::new_from_str("2s5s7s9sJs").unwrap().rank().unwrap();
    ///
    /// assert!(quads > flush);
    /// assert!(quads.strength() > flush.strength());
    /// ```
    pub fn strength(&self) -> u32 {
        (self.category() as u32) << CATEGORY_SHIFT | self.payload()
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HighCard => "High Card",
            Self::OnePair => "One Pair",
            Self::TwoPair => "Two Pair",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::Straight => "Straight",
            Self::Flush => "Flush",
            Self::FullHouse => "Full House",
            Self::FourOfAKind => "Four of a Kind",
            Self::StraightFlush => "Straight Flush",
        };
        f.write_str(name)
    }
}

/// Bit mask for the wheel (Ace, two, three, four, five)
const WHEEL: u32 = 0b1_0000_0000_1111;

/// Given a bitset of hand ranks. This method
/// will determine if there's a straight, and will give the
/// rank. Wheel is the lowest, broadway is the highest value.
///
/// Returns None if the hand ranks represented don't correspond
/// to a straight.
fn rank_straight(value_set: u32) -> Option<u32> {
    // Bit i is left standing only when i and the four values below
    // it are all present.
    let left =
        value_set & (value_set << 1) & (value_set << 2) & (value_set << 3) & (value_set << 4);
    let idx = left.leading_zeros();
    if idx < 32 {
        // The top card of the straight, minus three so that
        // two to six is 1 and the wheel can be 0.
        Some(31 - 3 - idx)
    } else if value_set & WHEEL == WHEEL {
        Some(0)
    } else {
        None
    }
}

/// Keep only the highest `n` set bits.
#[inline]
fn keep_highest(mut value: u32, n: u32) -> u32 {
    while value.count_ones() > n {
        value &= value - 1;
    }
    value
}

/// Rank five, six or seven distinct cards, returning the best five card
/// hand that can be made from them.
///
/// The cards are folded into per suit and per count value bitsets in one
/// pass. From there each category is a handful of bit operations, checked
/// from the strongest down.
///
/// This does no size checking so it's the form to use once the cards are
/// known to be good. `Rankable::rank` validates first.
pub fn rank_cards(cards: CardBitSet) -> Rank {
    debug_assert!((5..=7).contains(&cards.count()));

    let mut value_set: u32 = 0;
    let mut suit_value_sets: [u32; 4] = [0; 4];
    let mut value_to_count: [u8; 13] = [0; 13];

    for c in cards {
        let v = c.value as u32;
        value_set |= 1 << v;
        suit_value_sets[c.suit as usize] |= 1 << v;
        value_to_count[c.value as usize] += 1;
    }

    // Now rotate the value to count map.
    let mut count_to_value: [u32; 5] = [0; 5];
    for (value, &count) in value_to_count.iter().enumerate() {
        count_to_value[usize::from(count)] |= 1 << value;
    }

    // At most one suit can hold five of seven cards.
    let flush_set = suit_value_sets
        .iter()
        .copied()
        .find(|s| s.count_ones() >= 5);

    if let Some(sf) = flush_set.and_then(rank_straight) {
        return Rank::StraightFlush(sf);
    }

    if count_to_value[4] != 0 {
        let quads = count_to_value[4];
        return Rank::FourOfAKind(quads << 13 | keep_highest(value_set ^ quads, 1));
    }

    if count_to_value[3] != 0 {
        let trips = keep_highest(count_to_value[3], 1);
        // A second set of trips can be used as the pair.
        let pairs = (count_to_value[3] ^ trips) | count_to_value[2];
        if pairs != 0 {
            return Rank::FullHouse(trips << 13 | keep_highest(pairs, 1));
        }
    }

    if let Some(flush) = flush_set {
        return Rank::Flush(keep_highest(flush, 5));
    }

    if let Some(s) = rank_straight(value_set) {
        return Rank::Straight(s);
    }

    if count_to_value[3] != 0 {
        let trips = count_to_value[3];
        return Rank::ThreeOfAKind(trips << 13 | keep_highest(value_set ^ trips, 2));
    }

    match count_to_value[2].count_ones() {
        0 => Rank::HighCard(keep_highest(value_set, 5)),
        1 => {
            let pair = count_to_value[2];
            Rank::OnePair(pair << 13 | keep_highest(value_set ^ pair, 3))
        }
        _ => {
            // With three pairs the lowest one can still play as the kicker.
            let pairs = keep_highest(count_to_value[2], 2);
            Rank::TwoPair(pairs << 13 | keep_highest(value_set ^ pairs, 1))
        }
    }
}

/// Rank the best five cards by trying every five card subset.
///
/// This is much slower than `rank_cards` and gives the same answer. It's
/// here to check the fast path against.
pub fn best_rank_by_combinations(cards: &[Card]) -> Result<Rank, PokerError> {
    let set = checked_set(cards)?;
    let cards: Vec<Card> = set.into_iter().collect();
    CardIter::new(&cards, 5)
        .map(rank_cards)
        .max()
        .ok_or(PokerError::InvalidHandSize(cards.len()))
}

/// Turn cards into a set refusing duplicates and sizes that can't be
/// ranked.
fn checked_set(cards: &[Card]) -> Result<CardBitSet, PokerError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(PokerError::InvalidHandSize(cards.len()));
    }
    let mut set = CardBitSet::new();
    for c in cards {
        if set.contains(*c) {
            return Err(PokerError::DuplicateCardInHand(*c));
        }
        set.insert(*c);
    }
    Ok(set)
}

/// Can this turn into a hand rank?
pub trait Rankable {
    /// Rank the best five card hand in these cards.
    ///
    /// Fails with `InvalidHandSize` unless there are five to seven cards,
    /// and with `DuplicateCardInHand` if a card is given more than once.
    fn rank(&self) -> Result<Rank, PokerError>;

    /// Rank exactly five cards.
    fn rank_five(&self) -> Result<Rank, PokerError>;
}

impl Rankable for [Card] {
    fn rank(&self) -> Result<Rank, PokerError> {
        checked_set(self).map(rank_cards)
    }

    fn rank_five(&self) -> Result<Rank, PokerError> {
        if self.len() != 5 {
            return Err(PokerError::InvalidHandSize(self.len()));
        }
        self.rank()
    }
}

impl Rankable for Vec<Card> {
    fn rank(&self) -> Result<Rank, PokerError> {
        self[..].rank()
    }

    fn rank_five(&self) -> Result<Rank, PokerError> {
        self[..].rank_five()
    }
}

/// A bitset can't hold duplicates, so only the size is checked.
impl Rankable for CardBitSet {
    fn rank(&self) -> Result<Rank, PokerError> {
        match self.count() {
            5..=7 => Ok(rank_cards(*self)),
            n => Err(PokerError::InvalidHandSize(n)),
        }
    }

    fn rank_five(&self) -> Result<Rank, PokerError> {
        match self.count() {
            5 => Ok(rank_cards(*self)),
            n => Err(PokerError::InvalidHandSize(n)),
        }
    }
}

impl Rankable for Hand {
    fn rank(&self) -> Result<Rank, PokerError> {
        CardBitSet::from(*self).rank()
    }

    fn rank_five(&self) -> Result<Rank, PokerError> {
        CardBitSet::from(*self).rank_five()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    use super::*;
    use crate::core::{Deck, FULL_DECK, Value};

    fn rank_str(s: &str) -> Rank {
        Hand::new_from_str(s).unwrap().rank().unwrap()
    }

    fn bits(values: &[Value]) -> u32 {
        values.iter().fold(0, |acc, v| acc | 1 << (*v as u32))
    }

    #[test]
    fn test_cmp() {
        assert!(Rank::HighCard(0) < Rank::StraightFlush(0));
        assert!(Rank::HighCard(0) < Rank::FourOfAKind(0));
        assert!(Rank::HighCard(0) < Rank::ThreeOfAKind(0));
    }

    #[test]
    fn test_cmp_high() {
        assert!(Rank::HighCard(0) < Rank::HighCard(100));
    }

    #[test]
    fn test_high_card_hand() {
        let rank = bits(&[Value::Ace, Value::Eight, Value::Nine, Value::Ten, Value::Five]);
        assert_eq!(Rank::HighCard(rank), rank_str("Ad8h9cTc5c"));
    }

    #[test]
    fn test_flush() {
        let rank = bits(&[Value::Ace, Value::Eight, Value::Nine, Value::Ten, Value::Five]);
        assert_eq!(Rank::Flush(rank), rank_str("Ad8d9dTd5d"));
    }

    #[test]
    fn test_full_house() {
        let rank = bits(&[Value::Nine]) << 13 | bits(&[Value::Ace]);
        assert_eq!(Rank::FullHouse(rank), rank_str("AdAc9d9c9s"));
    }

    #[test]
    fn test_two_pair() {
        let rank = bits(&[Value::Ace, Value::Nine]) << 13 | bits(&[Value::Ten]);
        assert_eq!(Rank::TwoPair(rank), rank_str("AdAc9d9cTs"));
    }

    #[test]
    fn test_one_pair() {
        let rank = bits(&[Value::Ace]) << 13 | bits(&[Value::Nine, Value::Eight, Value::Ten]);
        assert_eq!(Rank::OnePair(rank), rank_str("AdAc9d8cTs"));
    }

    #[test]
    fn test_four_of_a_kind() {
        let rank = bits(&[Value::Ace]) << 13 | bits(&[Value::Ten]);
        assert_eq!(Rank::FourOfAKind(rank), rank_str("AdAcAsAhTs"));
    }

    #[test]
    fn test_wheel() {
        assert_eq!(Rank::Straight(0), rank_str("Ad2c3s4h5s"));
    }

    #[test]
    fn test_straight() {
        assert_eq!(Rank::Straight(1), rank_str("2c3s4h5s6d"));
        assert_eq!(Rank::Straight(9), rank_str("TcJsQhKsAd"));
    }

    #[test]
    fn test_wheel_loses_to_six_high() {
        assert!(rank_str("Ad2c3s4h5s") < rank_str("2c3s4h5s6d"));
    }

    #[test]
    fn test_three_of_a_kind() {
        let rank = bits(&[Value::Two]) << 13 | bits(&[Value::Five, Value::Six]);
        assert_eq!(Rank::ThreeOfAKind(rank), rank_str("2c2s2h5s6d"));
    }

    #[test]
    fn test_straight_flush_wheel() {
        assert_eq!(Rank::StraightFlush(0), rank_str("Ah2h3h4h5h"));
    }

    #[test]
    fn test_seven_card_straight_flush_over_quads() {
        // Quads are there but the straight flush is better.
        assert_eq!(Rank::StraightFlush(5), rank_str("6h7h8h9hTh9s9c"));
    }

    #[test]
    fn test_seven_card_flush_uses_top_five() {
        let rank = bits(&[Value::Ace, Value::King, Value::Nine, Value::Seven, Value::Five]);
        assert_eq!(Rank::Flush(rank), rank_str("AsKs9s7s5s3s2s"));
    }

    #[test]
    fn test_seven_card_two_trips_is_full_house() {
        let rank = bits(&[Value::King]) << 13 | bits(&[Value::Four]);
        assert_eq!(Rank::FullHouse(rank), rank_str("KsKcKh4s4c4hAd"));
    }

    #[test]
    fn test_seven_card_three_pair() {
        // The third pair's four is beaten by the queen kicker.
        let rank = bits(&[Value::Ace, Value::Nine]) << 13 | bits(&[Value::Queen]);
        assert_eq!(Rank::TwoPair(rank), rank_str("AsAc9s9c4h4dQd"));
    }

    #[test]
    fn test_seven_card_straight_top_end() {
        // 2 through 8 is an eight high straight.
        // The top card less three, so 6 high is 1 and 8 high is 3.
        assert_eq!(Rank::Straight(3), rank_str("2s3c4h5d6s7c8h"));
    }

    #[test]
    fn test_kicker_decides() {
        assert!(rank_str("AsAcKd7h2c") > rank_str("AhAdQs7c2h"));
        assert_eq!(rank_str("AsAcKd7h2c"), rank_str("AhAdKs7c2h"));
    }

    #[test]
    fn test_invalid_sizes() {
        let four: Vec<Card> = FULL_DECK[..4].to_vec();
        assert_eq!(Err(PokerError::InvalidHandSize(4)), four.rank());
        let eight: Vec<Card> = FULL_DECK[..8].to_vec();
        assert_eq!(Err(PokerError::InvalidHandSize(8)), eight.rank());
        let six: Vec<Card> = FULL_DECK[..6].to_vec();
        assert_eq!(Err(PokerError::InvalidHandSize(6)), six.rank_five());
    }

    #[test]
    fn test_duplicate_card() {
        let mut cards: Vec<Card> = FULL_DECK[..5].to_vec();
        cards.push(FULL_DECK[0]);
        assert_eq!(
            Err(PokerError::DuplicateCardInHand(FULL_DECK[0])),
            cards.rank()
        );
    }

    #[test]
    fn test_strength_orders_like_rank() {
        let mut rng = StdRng::seed_from_u64(420);
        let mut deck: Vec<Card> = Deck::default().iter().collect();
        for _ in 0..2_000 {
            deck.shuffle(&mut rng);
            let a = deck[..7].rank().unwrap();
            let b = deck[7..14].rank().unwrap();
            assert_eq!(a.cmp(&b), a.strength().cmp(&b.strength()));
        }
    }

    #[test]
    fn test_permutation_invariant() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck: Vec<Card> = Deck::default().iter().collect();
        for _ in 0..500 {
            deck.shuffle(&mut rng);
            let mut five: Vec<Card> = deck[..5].to_vec();
            let expected = five.rank().unwrap();
            for _ in 0..5 {
                five.shuffle(&mut rng);
                assert_eq!(expected, five.rank().unwrap());
            }
        }
    }

    #[test]
    fn test_total_and_transitive() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut deck: Vec<Card> = Deck::default().iter().collect();
        for _ in 0..1_000 {
            deck.shuffle(&mut rng);
            let a = deck[..5].rank().unwrap();
            let b = deck[5..10].rank().unwrap();
            let c = deck[10..15].rank().unwrap();
            let relations = [a < b, a > b, a == b];
            assert_eq!(1, relations.iter().filter(|r| **r).count());
            if a <= b && b <= c {
                assert!(a <= c);
            }
        }
    }

    #[test]
    fn test_seven_matches_best_of_combinations() {
        let mut rng = StdRng::seed_from_u64(420);
        let mut deck: Vec<Card> = Deck::default().iter().collect();
        for _ in 0..3_000 {
            deck.shuffle(&mut rng);
            for n in 5..=7 {
                assert_eq!(
                    best_rank_by_combinations(&deck[..n]).unwrap(),
                    deck[..n].rank().unwrap()
                );
            }
        }
    }

    #[test]
    fn test_category_counts_five_card() {
        // Every five card hand, bucketed by category, matches the known
        // counts.
        let cards: Vec<Card> = Deck::default().iter().collect();
        let mut counts = [0usize; 9];
        for hand in CardIter::new(&cards, 5) {
            counts[rank_cards(hand).category() as usize] += 1;
        }
        assert_eq!(
            [1_302_540, 1_098_240, 123_552, 54_912, 10_200, 5_108, 3_744, 624, 40],
            counts
        );
    }

    #[test]
    fn test_straight_mask_has_five() {
        for s in 0..10u32 {
            // Each straight index maps back to five values.
            let top = s + 3;
            let mask = if s == 0 { WHEEL } else { 0b11111 << (top - 4) };
            assert_eq!(5, mask.count_ones());
            assert_eq!(Some(s), rank_straight(mask));
        }
    }

    #[test]
    fn test_category_display() {
        assert_eq!("Full House", rank_str("AdAc9d9c9s").category().to_string());
    }
}
