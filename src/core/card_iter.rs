use super::{Card, CardBitSet};

/// Iterate every `num_cards` sized combination of some possible cards.
///
/// Combinations come out in lexicographic order of their positions in
/// `possible_cards`, each as a `CardBitSet`. Choosing zero cards yields a
/// single empty set; choosing more cards than there are yields nothing.
///
/// ```
/// use holdem_equity::core::{CardIter, Deck};
///
/// let cards: Vec<_> = Deck::default().iter().take(7).collect();
/// assert_eq!(21, CardIter::new(&cards, 5).count());
/// ```
#[derive(Debug, Clone)]
pub struct CardIter<'a> {
    // All the possible cards that can be dealt
    possible_cards: &'a [Card],

    // Set of current offsets being used to create card sets.
    idx: Vec<usize>,

    // Has the first combination been handed out
    started: bool,

    done: bool,
}

impl<'a> CardIter<'a> {
    pub fn new(possible_cards: &'a [Card], num_cards: usize) -> Self {
        Self {
            possible_cards,
            idx: (0..num_cards).collect(),
            started: false,
            done: num_cards > possible_cards.len(),
        }
    }

    fn advance(&mut self) -> bool {
        let n = self.possible_cards.len();
        let k = self.idx.len();
        // Find the right most position that can still move forward.
        let Some(pos) = (0..k).rev().find(|&i| self.idx[i] < n - k + i) else {
            return false;
        };
        self.idx[pos] += 1;
        for i in pos + 1..k {
            self.idx[i] = self.idx[i - 1] + 1;
        }
        true
    }
}

impl Iterator for CardIter<'_> {
    type Item = CardBitSet;

    fn next(&mut self) -> Option<CardBitSet> {
        if self.done {
            return None;
        }
        if self.started {
            if !self.advance() {
                self.done = true;
                return None;
            }
        } else {
            self.started = true;
        }

        Some(self.idx.iter().map(|i| self.possible_cards[*i]).collect())
    }
}

/// How many ways there are to pick `k` items out of `n`. Saturates rather
/// than overflowing.
///
/// ```
/// use holdem_equity::core::n_choose_k;
///
/// assert_eq!(1_712_304, n_choose_k(48, 5));
/// assert_eq!(1, n_choose_k(10, 0));
/// assert_eq!(0, n_choose_k(3, 4));
/// ```
pub fn n_choose_k(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        // result * (n - i) / (i + 1) is always an integer at every step.
        result = match result.checked_mul((n - i) as u64) {
            Some(v) => v / (i as u64 + 1),
            None => return u64::MAX,
        };
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Deck, Hand};
    use std::collections::HashSet;

    #[test]
    fn test_iter_one() {
        let h = Hand::new_from_str("2s").unwrap();
        let cards: Vec<Card> = h.iter().collect();

        for set in CardIter::new(&cards, 1) {
            assert_eq!(1, set.count());
        }
        assert_eq!(1, CardIter::new(&cards, 1).count());
    }

    #[test]
    fn test_iter_two() {
        let h = Hand::new_from_str("2s3s4s").unwrap();
        let cards: Vec<Card> = h.iter().collect();

        // Make sure that we get the correct number back.
        assert_eq!(3, CardIter::new(&cards, 2).count());

        // Make sure that everything has two cards and they are different.
        let uniq: HashSet<CardBitSet> = CardIter::new(&cards, 2).collect();
        assert_eq!(3, uniq.len());
        for set in uniq {
            assert_eq!(2, set.count());
        }
    }

    #[test]
    fn test_choose_zero() {
        let cards: Vec<Card> = Deck::default().iter().collect();
        let all: Vec<CardBitSet> = CardIter::new(&cards, 0).collect();
        assert_eq!(vec![CardBitSet::new()], all);
    }

    #[test]
    fn test_choose_too_many() {
        let cards: Vec<Card> = Deck::default().iter().take(3).collect();
        assert_eq!(0, CardIter::new(&cards, 4).count());
    }

    #[test]
    fn test_iter_matches_choose() {
        let cards: Vec<Card> = Deck::default().iter().take(12).collect();
        for k in 0..=12 {
            assert_eq!(n_choose_k(12, k), CardIter::new(&cards, k).count() as u64);
        }
    }

    #[test]
    fn test_iter_deck_two() {
        let cards: Vec<Card> = Deck::default().iter().collect();
        assert_eq!(1326, CardIter::new(&cards, 2).count());
    }

    #[test]
    fn test_choose_saturates() {
        assert_eq!(u64::MAX, n_choose_k(200, 100));
    }
}
