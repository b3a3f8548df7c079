use rayon::prelude::*;
use tracing::{Level, event};

use crate::core::{Card, CardBitSet, CardIter, Deck, n_choose_k};

use super::EquityError;
use super::range_sampler::RangeSampler;
use super::showdown::winners;
use super::tally::Tally;
use super::workers::StopSignal;

/// What one worker counted, plus the last range player it found no room
/// for.
#[derive(Debug)]
struct Partial {
    tally: Tally,
    stuck: Option<usize>,
}

impl Partial {
    fn new(num_players: usize) -> Self {
        Self {
            tally: Tally::new(num_players),
            stuck: None,
        }
    }

    fn merge(&mut self, other: &Partial) {
        self.tally.merge(&other.tally);
        self.stuck = other.stuck.or(self.stuck);
    }
}

/// Upper bound on how many deals an enumeration would visit. Range combos
/// that collide with each other are still counted, so this can overshoot.
pub(crate) fn deal_count(sampler: &RangeSampler) -> u64 {
    let assignments = sampler
        .ranged()
        .iter()
        .fold(1u64, |acc, (_, combos)| acc.saturating_mul(combos.len() as u64));
    let remaining = 52usize
        .saturating_sub(sampler.known().count())
        .saturating_sub(2 * sampler.ranged().len());
    assignments.saturating_mul(n_choose_k(remaining, sampler.board_needed()))
}

/// Count every deal exactly.
///
/// Work is split over the first range player's combos, and under each
/// seating over the lowest new board card. Seatings are walked one at a
/// time and only the undealt cards of the current one are held, so memory
/// doesn't depend on how many deals there are. Partial tallies are added
/// up in enumeration order.
///
/// Returns the tally, the number of deals, and whether the run was cut
/// short. A finished run knows the deal count exactly; a stopped one
/// reports the `deal_count` upper bound.
pub(crate) fn run_exhaustive(
    sampler: &RangeSampler,
    signal: &StopSignal,
) -> Result<(Tally, u64, bool), EquityError> {
    let n = sampler.num_players();
    let upper_bound = deal_count(sampler);
    event!(Level::DEBUG, upper_bound, "enumerating every deal");

    let holes: Vec<CardBitSet> = sampler
        .exact()
        .iter()
        .map(|e| e.unwrap_or(CardBitSet::new()))
        .collect();

    let total = match sampler.ranged().first() {
        None => {
            let mut partial = Partial::new(n);
            partial.tally = boards(sampler, &holes, sampler.known(), 1.0, signal);
            partial
        }
        Some((player, combos)) => {
            let parts: Vec<Option<Partial>> = combos
                .par_iter()
                .map(|combo| {
                    if signal.should_stop() {
                        return None;
                    }
                    let mut holes = holes.clone();
                    holes[*player] = combo.cards;
                    let mut partial = Partial::new(n);
                    seat(
                        sampler,
                        1,
                        sampler.known() | combo.cards,
                        combo.weight,
                        &mut holes,
                        signal,
                        &mut partial,
                    );
                    Some(partial)
                })
                .collect();
            parts
                .iter()
                .flatten()
                .fold(Partial::new(n), |mut acc, p| {
                    acc.merge(p);
                    acc
                })
        }
    };

    let interrupted = signal.interrupted();
    if total.tally.trials == 0 && !interrupted {
        if let Some(player) = total.stuck {
            return Err(EquityError::RangeExhausted {
                player,
                completed_trials: 0,
            });
        }
    }
    let deals = if interrupted {
        upper_bound
    } else {
        total.tally.trials
    };
    Ok((total.tally, deals, interrupted))
}

/// Hand out combos to the range players from `depth` on, then count the
/// boards for each complete seating.
fn seat(
    sampler: &RangeSampler,
    depth: usize,
    used: CardBitSet,
    weight: f64,
    holes: &mut [CardBitSet],
    signal: &StopSignal,
    out: &mut Partial,
) {
    if signal.should_stop() {
        return;
    }
    let Some((player, combos)) = sampler.ranged().get(depth) else {
        out.tally.merge(&boards(sampler, holes, used, weight, signal));
        return;
    };

    let mut placed = false;
    for combo in combos.iter().filter(|c| c.cards.is_disjoint(&used)) {
        placed = true;
        holes[*player] = combo.cards;
        seat(
            sampler,
            depth + 1,
            used | combo.cards,
            weight * combo.weight,
            holes,
            signal,
            out,
        );
    }
    if !placed {
        out.stuck = Some(*player);
    }
}

/// Every board completion for one seating.
fn boards(
    sampler: &RangeSampler,
    holes: &[CardBitSet],
    used: CardBitSet,
    weight: f64,
    signal: &StopSignal,
) -> Tally {
    let n = sampler.num_players();
    let k = sampler.board_needed();
    if k == 0 {
        let mut tally = Tally::new(n);
        tally.record(winners(holes, sampler.board()).0, weight);
        return tally;
    }

    let rest: Vec<Card> = Deck::without(&used).iter().collect();
    if rest.len() < k {
        return Tally::new(n);
    }
    let parts: Vec<Option<Tally>> = (0..=rest.len() - k)
        .into_par_iter()
        .map(|first| {
            if signal.should_stop() {
                return None;
            }
            let board = sampler.board() | rest[first];
            let mut tally = Tally::new(n);
            for extra in CardIter::new(&rest[first + 1..], k - 1) {
                tally.record(winners(holes, board | extra).0, weight);
            }
            Some(tally)
        })
        .collect();

    parts.iter().flatten().fold(Tally::new(n), |mut acc, t| {
        acc.merge(t);
        acc
    })
}
