use std::fmt;

use super::tally::Tally;

/// Which algorithm produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvaluationMode {
    Exhaustive,
    Sampled,
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhaustive => write!(f, "exhaustive"),
            Self::Sampled => write!(f, "sampled"),
        }
    }
}

/// How one player fared.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerEquity {
    /// Chance of winning the whole pot.
    pub win: f64,
    /// Chance of splitting the pot with someone.
    pub tie: f64,
    /// Expected share of the pot, a k way split counting 1/k.
    pub equity: f64,
    /// Weight of outright wins behind `win`.
    pub wins: f64,
    /// Weight of split pots behind `tie`.
    pub ties: f64,
}

/// The answer to an equity query.
///
/// Players are in the same order as the scenario. When the run was cut
/// short `provisional` is set and `trials` says how much was actually
/// done.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquityResult {
    pub players: Vec<PlayerEquity>,
    /// Deals evaluated.
    pub trials: u64,
    /// Deals asked for: the trial budget when sampling, every deal when
    /// enumerating.
    pub requested_trials: u64,
    pub mode: EvaluationMode,
    /// Every possible deal was counted.
    pub exact: bool,
    pub provisional: bool,
    pub seed: u64,
}

impl EquityResult {
    pub(crate) fn from_tally(
        tally: &Tally,
        requested_trials: u64,
        mode: EvaluationMode,
        provisional: bool,
        seed: u64,
    ) -> Self {
        let total = tally.total_weight;
        let ratio = |w: f64| if total > 0.0 { w / total } else { 0.0 };
        let players = (0..tally.num_players())
            .map(|p| {
                let wins = tally.wins(p);
                let ties = tally.ties(p);
                PlayerEquity {
                    win: ratio(wins),
                    tie: ratio(ties),
                    equity: ratio(tally.pot_share(p)),
                    wins,
                    ties,
                }
            })
            .collect();
        Self {
            players,
            trials: tally.trials,
            requested_trials,
            mode,
            exact: mode == EvaluationMode::Exhaustive && !provisional,
            provisional,
            seed,
        }
    }

    /// Sum of every player's equity. One for any finished run.
    pub fn total_equity(&self) -> f64 {
        self.players.iter().map(|p| p.equity).sum()
    }
}
