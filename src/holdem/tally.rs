use crate::utils::PlayerBitSet;

/// Win and tie credit gathered by one worker.
///
/// `shares[player][k]` is the weight of every outcome where `player` was
/// one of exactly `k + 1` players sharing the pot. Keeping the split count
/// apart means merging is plain addition and equity can be recovered
/// without rounding a `1/k` into every trial.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tally {
    pub(crate) trials: u64,
    pub(crate) total_weight: f64,
    pub(crate) shares: Vec<Vec<f64>>,
}

impl Tally {
    pub(crate) fn new(num_players: usize) -> Self {
        Self {
            trials: 0,
            total_weight: 0.0,
            shares: vec![vec![0.0; num_players]; num_players],
        }
    }

    pub(crate) fn num_players(&self) -> usize {
        self.shares.len()
    }

    /// Credit one showdown.
    pub(crate) fn record(&mut self, winners: PlayerBitSet, weight: f64) {
        self.trials += 1;
        self.total_weight += weight;
        let k = winners.count();
        if k == 0 {
            return;
        }
        for idx in winners.ones() {
            self.shares[idx][k - 1] += weight;
        }
    }

    pub(crate) fn merge(&mut self, other: &Tally) {
        debug_assert_eq!(self.num_players(), other.num_players());
        self.trials += other.trials;
        self.total_weight += other.total_weight;
        for (mine, theirs) in self.shares.iter_mut().zip(other.shares.iter()) {
            for (m, t) in mine.iter_mut().zip(theirs.iter()) {
                *m += t;
            }
        }
    }

    /// Weight of outright wins.
    pub(crate) fn wins(&self, player: usize) -> f64 {
        self.shares[player][0]
    }

    /// Weight of every split pot this player was part of.
    pub(crate) fn ties(&self, player: usize) -> f64 {
        self.shares[player][1..].iter().sum()
    }

    /// Weight of pots won, with a k way split counting 1/k.
    pub(crate) fn pot_share(&self, player: usize) -> f64 {
        self.shares[player]
            .iter()
            .enumerate()
            .map(|(k, w)| w / (k + 1) as f64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn set(players: &[usize]) -> PlayerBitSet {
        let mut s = PlayerBitSet::default();
        for p in players {
            s.enable(*p);
        }
        s
    }

    #[test]
    fn test_record() {
        let mut t = Tally::new(3);
        t.record(set(&[0]), 1.0);
        t.record(set(&[0, 2]), 1.0);
        t.record(set(&[0, 1, 2]), 1.0);

        assert_eq!(3, t.trials);
        assert_eq!(1.0, t.wins(0));
        assert_eq!(2.0, t.ties(0));
        assert_eq!(0.0, t.wins(2));
        assert_relative_eq!(1.0 + 0.5 + 1.0 / 3.0, t.pot_share(0));
        assert_relative_eq!(1.0 / 3.0, t.pot_share(1));

        let total: f64 = (0..3).map(|p| t.pot_share(p)).sum();
        assert_relative_eq!(t.total_weight, total);
    }

    #[test]
    fn test_merge_is_addition() {
        let mut a = Tally::new(2);
        a.record(set(&[0]), 2.0);
        let mut b = Tally::new(2);
        b.record(set(&[0, 1]), 0.5);
        b.record(set(&[1]), 1.0);

        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);
        assert_eq!(ab, ba);
        assert_eq!(3, ab.trials);
        assert_eq!(3.5, ab.total_weight);
        // Half of the 0.5 chop plus the 1.0 outright win.
        assert_eq!(1.25, ab.pot_share(1));
    }
}
