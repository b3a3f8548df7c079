use rand::Rng;

use crate::core::{CardBitSet, Deck};

use super::{EquityError, PlayerHand, Scenario};

/// One complete deal: every player's two hole cards and a five card board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub holes: Vec<CardBitSet>,
    pub board: CardBitSet,
}

impl Deal {
    pub fn new(num_players: usize) -> Self {
        Self {
            holes: vec![CardBitSet::new(); num_players],
            board: CardBitSet::new(),
        }
    }
}

/// A range combo narrowed down to what the hot loop needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LiveCombo {
    pub(crate) cards: CardBitSet,
    pub(crate) weight: f64,
}

/// Produces random, non overlapping deals for a scenario.
///
/// Ranges are filtered once against the cards that are always known (the
/// board, dead cards and exact holes). Each deal then has every range
/// player pick a combo on their own, with probability proportional to its
/// weight. If two picks share a card the whole deal is thrown away and
/// drawn again. A deal that survives is chosen with probability
/// proportional to the product of its combos' weights, the same weighting
/// exhaustive enumeration uses. The board is completed from whatever is
/// left.
#[derive(Debug, Clone)]
pub struct RangeSampler {
    known: CardBitSet,
    board: CardBitSet,
    board_needed: usize,
    exact: Vec<Option<CardBitSet>>,
    ranged: Vec<(usize, Vec<LiveCombo>)>,
    // Running weight totals, one list per entry in `ranged`.
    cumulative: Vec<Vec<f64>>,
    max_resamples: u32,
}

impl RangeSampler {
    /// Build a sampler for an already validated scenario.
    ///
    /// Fails with `RangeExhausted` when every combo of some range is
    /// blocked by the known cards.
    pub fn new(scenario: &Scenario, max_resamples: u32) -> Result<Self, EquityError> {
        let known = scenario.known_cards();
        let mut exact = Vec::with_capacity(scenario.players.len());
        let mut ranged = Vec::new();

        for (player, hand) in scenario.players.iter().enumerate() {
            match hand {
                PlayerHand::Exact(h) => exact.push(Some(h.cards())),
                PlayerHand::Range(range) => {
                    exact.push(None);
                    let live: Vec<LiveCombo> = range
                        .without_blocked(&known)
                        .into_iter()
                        .map(|c| LiveCombo {
                            cards: c.cards.cards(),
                            weight: c.weight,
                        })
                        .collect();
                    if live.is_empty() {
                        return Err(EquityError::RangeExhausted {
                            player,
                            completed_trials: 0,
                        });
                    }
                    ranged.push((player, live));
                }
            }
        }

        let cumulative = ranged
            .iter()
            .map(|(_, combos)| {
                combos
                    .iter()
                    .scan(0.0, |total, c| {
                        *total += c.weight;
                        Some(*total)
                    })
                    .collect()
            })
            .collect();
        Ok(Self {
            known,
            board: scenario.board.iter().copied().collect(),
            board_needed: scenario.board_needed(),
            exact,
            ranged,
            cumulative,
            max_resamples,
        })
    }

    pub fn num_players(&self) -> usize {
        self.exact.len()
    }

    /// Cards in play before anything is dealt.
    pub(crate) fn known(&self) -> CardBitSet {
        self.known
    }

    pub(crate) fn board(&self) -> CardBitSet {
        self.board
    }

    pub(crate) fn board_needed(&self) -> usize {
        self.board_needed
    }

    pub(crate) fn exact(&self) -> &[Option<CardBitSet>] {
        &self.exact
    }

    /// Range players and their live combos, in seat order.
    pub(crate) fn ranged(&self) -> &[(usize, Vec<LiveCombo>)] {
        &self.ranged
    }

    /// Fill `deal` with a fresh random deal.
    ///
    /// When a range player's pick collides with an earlier one, the whole
    /// deal is thrown away and tried again, up to `max_resamples` more
    /// times. Running out of retries is `RangeExhausted` for the player
    /// that collided last; `completed_trials` is left at zero for the
    /// caller to fill in.
    pub fn sample<R: Rng>(&self, rng: &mut R, deal: &mut Deal) -> Result<(), EquityError> {
        let mut failed = 0;
        for _ in 0..=self.max_resamples {
            match self.try_sample(rng, deal)? {
                None => return Ok(()),
                Some(player) => failed = player,
            }
        }
        Err(EquityError::RangeExhausted {
            player: failed,
            completed_trials: 0,
        })
    }

    /// Returns the player whose pick collided, if any.
    fn try_sample<R: Rng>(
        &self,
        rng: &mut R,
        deal: &mut Deal,
    ) -> Result<Option<usize>, EquityError> {
        let mut used = self.known;
        for (hole, exact) in deal.holes.iter_mut().zip(self.exact.iter()) {
            *hole = exact.unwrap_or(CardBitSet::new());
        }

        for ((player, combos), cumulative) in self.ranged.iter().zip(self.cumulative.iter()) {
            let cards = pick_weighted(combos, cumulative, rng);
            if !cards.is_disjoint(&used) {
                return Ok(Some(*player));
            }
            used |= cards;
            deal.holes[*player] = cards;
        }

        deal.board = self.board;
        Deck::without(&used).deal_into(self.board_needed, rng, &mut deal.board)?;
        Ok(None)
    }
}

/// Pick a combo with probability proportional to its weight. `cumulative`
/// holds the running weight totals and its last entry is positive.
fn pick_weighted<R: Rng>(combos: &[LiveCombo], cumulative: &[f64], rng: &mut R) -> CardBitSet {
    let total = cumulative.last().copied().unwrap_or(0.0);
    let target = rng.random::<f64>() * total;
    let idx = cumulative
        .partition_point(|&c| c <= target)
        .min(combos.len() - 1);
    combos[idx].cards
}
