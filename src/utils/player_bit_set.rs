use std::ops::BitOr;

/// A set of seat indexes. Used to hold every player that tied for the
/// best hand.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerBitSet {
    set: u32,
}

impl PlayerBitSet {
    /// The largest seat index plus one that can be stored.
    pub const MAX_PLAYERS: usize = 32;

    /// A set with the first `players` seats enabled.
    pub fn new(players: usize) -> Self {
        debug_assert!(players <= Self::MAX_PLAYERS);
        let set = if players >= Self::MAX_PLAYERS {
            u32::MAX
        } else {
            (1 << players) - 1
        };
        Self { set }
    }
    pub fn count(&self) -> usize {
        self.set.count_ones() as usize
    }
    pub fn empty(&self) -> bool {
        self.set == 0
    }
    pub fn enable(&mut self, idx: usize) {
        self.set |= 1 << idx;
    }
    pub fn disable(&mut self, idx: usize) {
        self.set &= !(1 << idx);
    }
    pub fn get(&self, idx: usize) -> bool {
        (self.set & (1 << idx)) != 0
    }
    pub fn ones(self) -> ActivePlayerBitSetIter {
        ActivePlayerBitSetIter { set: self.set }
    }
}

impl BitOr for PlayerBitSet {
    type Output = PlayerBitSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            set: self.set | rhs.set,
        }
    }
}

pub struct ActivePlayerBitSetIter {
    set: u32,
}

impl Iterator for ActivePlayerBitSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.set == 0 {
            None
        } else {
            // Find the index of the first non-zero
            let idx = self.set.trailing_zeros() as usize;
            // Then set the first non-zero to zero
            self.set &= !(1 << idx);
            // Then emit the next one
            Some(idx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_count() {
        assert_eq!(7, PlayerBitSet::new(7).count());
        assert_eq!(32, PlayerBitSet::new(32).count());
    }

    #[test]
    fn test_default_zero_count() {
        assert_eq!(0, PlayerBitSet::default().count());
        assert!(PlayerBitSet::default().empty());
    }

    #[test]
    fn test_disable_count() {
        let mut s = PlayerBitSet::new(7);

        assert_eq!(7, s.count());
        s.disable(6);
        assert_eq!(6, s.count());
        s.disable(0);
        assert_eq!(5, s.count());
    }

    #[test]
    fn test_enable_count() {
        let mut s = PlayerBitSet::default();

        assert_eq!(0, s.count());
        s.enable(0);
        assert_eq!(1, s.count());
        s.enable(0);
        assert_eq!(1, s.count());

        s.enable(2);
        assert_eq!(2, s.count());
        assert!(s.get(2));
        assert!(!s.get(1));

        s.disable(0);
        assert_eq!(1, s.count());
    }

    #[test]
    fn test_iter_with_disabled() {
        let mut s = PlayerBitSet::new(3);
        assert_eq!(vec![0, 1, 2], s.ones().collect::<Vec<_>>());

        s.disable(0);
        assert_eq!(vec![1, 2], s.ones().collect::<Vec<_>>());
    }

    #[test]
    fn test_bit_or() {
        let mut a = PlayerBitSet::default();
        a.enable(1);
        let mut b = PlayerBitSet::default();
        b.enable(4);
        assert_eq!(vec![1, 4], (a | b).ones().collect::<Vec<_>>());
    }
}
