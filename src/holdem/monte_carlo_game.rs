use rand::Rng;
use rayon::prelude::*;
use tracing::{Level, event};

use crate::core::Rank;
use crate::utils::PlayerBitSet;

use super::range_sampler::{Deal, RangeSampler};
use super::showdown::winners;
use super::tally::Tally;
use super::workers::{StopSignal, batch_rng};
use super::{EquityError, Scenario};

/// Plays out random deals of a scenario to the river.
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use holdem_equity::holdem::{MonteCarloGame, PlayerHand, Scenario};
///
/// let scenario = Scenario::new(
///     vec![],
///     vec![
///         PlayerHand::try_from("AdAh").unwrap(),
///         PlayerHand::try_from("2c2s").unwrap(),
///     ],
///     vec![],
/// );
/// let mut game = MonteCarloGame::new(&scenario, 64).unwrap();
/// let mut rng = StdRng::seed_from_u64(420);
/// let equity = game.estimate_equity(&mut rng, 1_000).unwrap();
///
/// assert!(equity[0] > equity[1]);
/// ```
#[derive(Debug, Clone)]
pub struct MonteCarloGame {
    sampler: RangeSampler,
    deal: Deal,
}

impl MonteCarloGame {
    /// Validate the scenario and get ready to deal it.
    pub fn new(scenario: &Scenario, max_resamples: u32) -> Result<Self, EquityError> {
        scenario.validate()?;
        Ok(Self::from_sampler(RangeSampler::new(scenario, max_resamples)?))
    }

    pub(crate) fn from_sampler(sampler: RangeSampler) -> Self {
        let deal = Deal::new(sampler.num_players());
        Self { sampler, deal }
    }

    /// Simulate finishing a holdem game.
    ///
    /// This will deal any unknown hole cards, fill out the board and then
    /// return which hands had the best rank in the end.
    pub fn simulate<R: Rng>(&mut self, rng: &mut R) -> Result<(PlayerBitSet, Rank), EquityError> {
        self.sampler.sample(rng, &mut self.deal)?;
        Ok(winners(&self.deal.holes, self.deal.board))
    }

    /// The last deal `simulate` produced.
    pub fn deal(&self) -> &Deal {
        &self.deal
    }

    /// Run `iterations` trials and return each player's share of the pot.
    pub fn estimate_equity<R: Rng>(
        &mut self,
        rng: &mut R,
        iterations: u64,
    ) -> Result<Vec<f64>, EquityError> {
        let tally = self.run_batch(rng, iterations)?;
        Ok((0..tally.num_players())
            .map(|p| {
                if tally.trials == 0 {
                    0.0
                } else {
                    tally.pot_share(p) / tally.trials as f64
                }
            })
            .collect())
    }

    /// Run `trials` simulations into a fresh tally. On failure the error
    /// reports how many trials this batch finished.
    pub(crate) fn run_batch<R: Rng>(&mut self, rng: &mut R, trials: u64) -> Result<Tally, EquityError> {
        let mut tally = Tally::new(self.sampler.num_players());
        for _ in 0..trials {
            match self.simulate(rng) {
                Ok((found, _)) => tally.record(found, 1.0),
                Err(EquityError::RangeExhausted { player, .. }) => {
                    return Err(EquityError::RangeExhausted {
                        player,
                        completed_trials: tally.trials,
                    });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(tally)
    }
}

/// How many batches are in flight per pool thread before their tallies
/// are folded into the total.
const BATCHES_PER_THREAD: usize = 4;

/// Split `trials` into batches, run them on the current rayon pool and
/// add the tallies up in batch order.
///
/// Each batch gets its own generator keyed by `seed` and the batch index,
/// so the result only depends on the seed and the batch size, never on
/// scheduling. Batches run a window at a time and each window is folded
/// before the next starts, so memory doesn't grow with `trials`.
///
/// When a batch runs out of resamples the run fails with the trials from
/// every earlier batch plus the ones the failing batch finished. Later
/// batches are ignored even if they already ran, so the count is the same
/// for a given seed on any pool.
///
/// The flag returned is true when some batches were skipped because the
/// run was cancelled or timed out.
pub(crate) fn run_sampled(
    sampler: &RangeSampler,
    seed: u64,
    trials: u64,
    batch_size: u64,
    signal: &StopSignal,
) -> Result<(Tally, bool), EquityError> {
    let num_batches = trials.div_ceil(batch_size);
    let window = (rayon::current_num_threads() * BATCHES_PER_THREAD).max(1) as u64;
    event!(Level::DEBUG, num_batches, batch_size, window, "dispatching batches");

    let mut total = Tally::new(sampler.num_players());
    let mut first = 0;
    while first < num_batches && !signal.should_stop() {
        let last = num_batches.min(first + window);
        let outcomes: Vec<Option<Result<Tally, EquityError>>> = (first..last)
            .into_par_iter()
            .map(|idx| {
                if signal.should_stop() {
                    return None;
                }
                let start = idx * batch_size;
                let n = batch_size.min(trials - start);
                event!(Level::DEBUG, batch = idx, trials = n, "running batch");
                let mut game = MonteCarloGame::from_sampler(sampler.clone());
                let mut rng = batch_rng(seed, idx);
                Some(game.run_batch(&mut rng, n))
            })
            .collect();

        for outcome in outcomes.into_iter().flatten() {
            match outcome {
                Ok(tally) => total.merge(&tally),
                Err(EquityError::RangeExhausted {
                    player,
                    completed_trials,
                }) => {
                    let completed_trials = total.trials + completed_trials;
                    event!(
                        Level::WARN,
                        player,
                        completed_trials,
                        "range exhausted, giving up"
                    );
                    return Err(EquityError::RangeExhausted {
                        player,
                        completed_trials,
                    });
                }
                Err(e) => return Err(e),
            }
        }
        first = last;
    }

    Ok((total, signal.interrupted()))
}
