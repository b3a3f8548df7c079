use rand::Rng;
use tracing::{Level, event, instrument};

use crate::core::Card;

use super::equity_result::{EquityResult, EvaluationMode};
use super::exhaustive::{deal_count, run_exhaustive};
use super::monte_carlo_game::run_sampled;
use super::range_sampler::RangeSampler;
use super::workers::{StopSignal, run_on_pool};
use super::{
    CancelToken, EquityError, ModeSelection, PlayerHand, Scenario, ScenarioError,
    SimulationConfig,
};

/// # EquityQueryBuilder
///
/// Collects the board, the players and the config for an equity
/// question. `build` checks everything up front so a query that builds
/// can only fail while running if ranges keep colliding.
///
/// ## Examples
///
/// ```
/// use holdem_equity::holdem::{EquityQueryBuilder, SimulationConfig};
///
/// let result = EquityQueryBuilder::default()
///     .board_str("AhKd7c")
///     .unwrap()
///     .player_str("QsQc")
///     .unwrap()
///     .player_str("AK, 77")
///     .unwrap()
///     .config(SimulationConfig::default().trials(2_000).seed(42))
///     .build()
///     .unwrap()
///     .run()
///     .unwrap();
///
/// assert_eq!(2, result.players.len());
/// assert!((result.total_equity() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EquityQueryBuilder {
    board: Vec<Card>,
    players: Vec<PlayerHand>,
    dead: Vec<Card>,
    config: SimulationConfig,
}

impl EquityQueryBuilder {
    pub fn board(mut self, board: Vec<Card>) -> Self {
        self.board = board;
        self
    }

    /// Set the board from a string like `"AhKd7c"`.
    pub fn board_str(self, board: &str) -> Result<Self, EquityError> {
        let board = parse_cards(board)?;
        Ok(self.board(board))
    }

    /// Add one more player.
    pub fn player(mut self, hand: impl Into<PlayerHand>) -> Self {
        self.players.push(hand.into());
        self
    }

    /// Add a player from exact cards (`"AsKs"`) or range notation.
    pub fn player_str(self, hand: &str) -> Result<Self, EquityError> {
        let hand = PlayerHand::try_from(hand)?;
        Ok(self.player(hand))
    }

    pub fn players(mut self, players: Vec<PlayerHand>) -> Self {
        self.players = players;
        self
    }

    /// Cards known to be out of play, burned or folded.
    pub fn dead(mut self, dead: Vec<Card>) -> Self {
        self.dead = dead;
        self
    }

    pub fn dead_str(self, dead: &str) -> Result<Self, EquityError> {
        let dead = parse_cards(dead)?;
        Ok(self.dead(dead))
    }

    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate and produce the query.
    pub fn build(self) -> Result<EquityQuery, EquityError> {
        EquityQuery::new(Scenario::new(self.board, self.players, self.dead), self.config)
    }
}

fn parse_cards(cards: &str) -> Result<Vec<Card>, EquityError> {
    // Repeats are kept so validation can name the duplicate.
    let cards: Vec<char> = cards.chars().filter(|c| !c.is_whitespace()).collect();
    cards
        .chunks(2)
        .map(|pair| {
            let s: String = pair.iter().collect();
            Card::try_from(s.as_str()).map_err(EquityError::from)
        })
        .collect()
}

/// A validated scenario ready to be run.
#[derive(Debug, Clone)]
pub struct EquityQuery {
    scenario: Scenario,
    config: SimulationConfig,
}

impl EquityQuery {
    /// Check the scenario and the config.
    pub fn new(scenario: Scenario, config: SimulationConfig) -> Result<Self, EquityError> {
        scenario.validate()?;
        if config.trials == 0 {
            return Err(ScenarioError::ZeroTrials.into());
        }
        if config.batch_size == 0 {
            return Err(ScenarioError::ZeroBatchSize.into());
        }
        Ok(Self { scenario, config })
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run to completion, or until the configured timeout.
    pub fn run(&self) -> Result<EquityResult, EquityError> {
        self.run_with_cancel(&CancelToken::new())
    }

    /// Run until done or until `token` is cancelled. A cancelled run
    /// still returns the work that finished, marked provisional.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            players = self.scenario.players.len(),
            board = self.scenario.board.len(),
            trials = self.config.trials,
        )
    )]
    pub fn run_with_cancel(&self, token: &CancelToken) -> Result<EquityResult, EquityError> {
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let sampler = RangeSampler::new(&self.scenario, self.config.max_resamples)?;

        let deals = deal_count(&sampler);
        let mode = match self.config.mode {
            ModeSelection::Exhaustive => EvaluationMode::Exhaustive,
            ModeSelection::Sampled => EvaluationMode::Sampled,
            ModeSelection::Auto if deals <= self.config.exhaustive_threshold => {
                EvaluationMode::Exhaustive
            }
            ModeSelection::Auto => EvaluationMode::Sampled,
        };
        event!(Level::DEBUG, %mode, deals, seed, "starting equity run");

        let signal = StopSignal::new(token, self.config.timeout);
        let (tally, requested, provisional) = run_on_pool(self.config.threads, || match mode {
            EvaluationMode::Exhaustive => run_exhaustive(&sampler, &signal),
            EvaluationMode::Sampled => run_sampled(
                &sampler,
                seed,
                self.config.trials,
                self.config.batch_size,
                &signal,
            )
            .map(|(tally, stopped)| (tally, self.config.trials, stopped)),
        })??;

        let result = EquityResult::from_tally(&tally, requested, mode, provisional, seed);
        if provisional {
            event!(
                Level::INFO,
                trials = result.trials,
                requested,
                "equity run stopped early"
            );
        } else {
            event!(Level::INFO, trials = result.trials, %mode, "equity run finished");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::{FULL_DECK, PokerError};
    use crate::holdem::HoleCards;

    fn query(board: &str, players: &[&str], config: SimulationConfig) -> EquityQuery {
        players
            .iter()
            .fold(EquityQueryBuilder::default().board_str(board).unwrap(), |b, p| {
                b.player_str(p).unwrap()
            })
            .config(config)
            .build()
            .unwrap()
    }

    #[test_log::test]
    fn test_aks_vs_queens_exact() {
        let result = query(
            "",
            &["AsKs", "QhQd"],
            SimulationConfig::default().mode(ModeSelection::Exhaustive),
        )
        .run()
        .unwrap();

        assert!(result.exact);
        assert!(!result.provisional);
        assert_eq!(EvaluationMode::Exhaustive, result.mode);
        assert_eq!(1_712_304, result.trials);
        assert_eq!(1_712_304, result.requested_trials);
        assert_eq!(787_966.0, result.players[0].wins);
        assert_eq!(917_606.0, result.players[1].wins);
        assert_eq!(6_732.0, result.players[0].ties);
        assert_eq!(6_732.0, result.players[1].ties);
        assert_abs_diff_eq!(0.462_144_57, result.players[0].equity, epsilon = 1e-8);
        assert_abs_diff_eq!(0.537_855_43, result.players[1].equity, epsilon = 1e-8);
    }

    #[test_log::test]
    fn test_full_board_single_trial() {
        let result = query("2c7d9hTsJs", &["AsKs", "QhQd"], SimulationConfig::default())
            .run()
            .unwrap();
        assert!(result.exact);
        assert_eq!(1, result.trials);
        assert_eq!(0.0, result.players[0].equity);
        assert_eq!(1.0, result.players[1].equity);
        assert_eq!(1.0, result.players[1].win);
        assert_eq!(0.0, result.players[1].tie);
    }

    #[test_log::test]
    fn test_auto_picks_sampling_preflop() {
        let result = query(
            "",
            &["AsKs", "QhQd"],
            SimulationConfig::default().trials(5_000).seed(9),
        )
        .run()
        .unwrap();
        assert_eq!(EvaluationMode::Sampled, result.mode);
        assert!(!result.exact);
        assert_eq!(5_000, result.trials);
        assert_eq!(9, result.seed);
    }

    #[test_log::test]
    fn test_auto_picks_enumeration_on_turn() {
        let result = query("2c7d9hTs", &["AsKs", "QQ, JJ"], SimulationConfig::default())
            .run()
            .unwrap();
        assert_eq!(EvaluationMode::Exhaustive, result.mode);
        assert!(result.exact);
        assert_abs_diff_eq!(1.0, result.total_equity(), epsilon = 1e-12);
    }

    #[test_log::test]
    fn test_seeded_runs_match_across_threads() {
        let config = SimulationConfig::default()
            .mode(ModeSelection::Sampled)
            .trials(20_000)
            .batch_size(1_000)
            .seed(1234);
        let players = ["AsKs", "QQ+, AKo", "87s, 65s"];
        let one = query("2h", &players, config.clone().threads(1)).run().unwrap();
        let four = query("2h", &players, config.clone().threads(4)).run().unwrap();
        let global = query("2h", &players, config).run().unwrap();
        assert_eq!(one, four);
        assert_eq!(one, global);
    }

    #[test_log::test]
    fn test_sampling_converges_to_exact() {
        let players = ["AhJd", "9s9c"];
        let exact = query(
            "Ks8h2d",
            &players,
            SimulationConfig::default().mode(ModeSelection::Exhaustive),
        )
        .run()
        .unwrap();
        let n = 50_000;
        let sampled = query(
            "Ks8h2d",
            &players,
            SimulationConfig::default()
                .mode(ModeSelection::Sampled)
                .trials(n)
                .seed(5),
        )
        .run()
        .unwrap();

        for (e, s) in exact.players.iter().zip(sampled.players.iter()) {
            // Five standard errors.
            let bound = 5.0 * (e.equity * (1.0 - e.equity) / n as f64).sqrt();
            assert_abs_diff_eq!(e.equity, s.equity, epsilon = bound);
        }
    }

    #[test_log::test]
    fn test_sampling_converges_with_blocking_ranges() {
        // Player 0 only wins with AsAh, which is one of three equally
        // weighted deals once AsAh against AsKd is ruled out.
        let board = "2c3d7h8sTd";
        let players = ["AsAh, 4c5h", "AsKd, KcKh"];
        let exact = query(
            board,
            &players,
            SimulationConfig::default().mode(ModeSelection::Exhaustive),
        )
        .run()
        .unwrap();
        assert!(exact.exact);
        assert_abs_diff_eq!(1.0 / 3.0, exact.players[0].equity, epsilon = 1e-12);

        let n = 60_000;
        let sampled = query(
            board,
            &players,
            SimulationConfig::default()
                .mode(ModeSelection::Sampled)
                .trials(n)
                .seed(21),
        )
        .run()
        .unwrap();
        assert_eq!(n, sampled.trials);
        for (e, s) in exact.players.iter().zip(sampled.players.iter()) {
            let bound = 5.0 * (e.equity * (1.0 - e.equity) / n as f64).sqrt();
            assert_abs_diff_eq!(e.equity, s.equity, epsilon = bound);
        }
    }

    #[test_log::test]
    fn test_equity_sums_to_one() {
        let result = query(
            "",
            &["AA", "KK", "QQ", "AKs", "72o"],
            SimulationConfig::default().trials(10_000).seed(3),
        )
        .run()
        .unwrap();
        assert_abs_diff_eq!(1.0, result.total_equity(), epsilon = 1e-9);
    }

    #[test_log::test]
    fn test_cancelled_is_provisional() {
        let q = query(
            "",
            &["AsKs", "QhQd"],
            SimulationConfig::default().trials(1_000_000).seed(1),
        );
        let token = CancelToken::new();
        token.cancel();
        let result = q.run_with_cancel(&token).unwrap();
        assert!(result.provisional);
        assert!(!result.exact);
        assert!(result.trials < result.requested_trials);
    }

    #[test_log::test]
    fn test_timeout_is_provisional() {
        let q = query(
            "",
            &["AsKs", "QhQd"],
            SimulationConfig::default()
                .trials(1_000_000)
                .timeout(Duration::ZERO),
        );
        let result = q.run().unwrap();
        assert!(result.provisional);
        assert_eq!(0, result.trials);
    }

    #[test_log::test]
    fn test_range_exhausted() {
        // Player 0 holds the ace of spades, so only AhQh is left.
        let result = query(
            "",
            &["AsKs", "AsQs, AhQh"],
            SimulationConfig::default().trials(1_000).seed(8),
        )
        .run()
        .unwrap();
        assert_eq!(1_000, result.trials);

        let builder = EquityQueryBuilder::default()
            .player_str("AsKs")
            .unwrap()
            .player_str("AsQs, AsJs")
            .unwrap();
        assert!(matches!(
            builder.build().unwrap().run(),
            Err(EquityError::RangeExhausted {
                player: 1,
                completed_trials: 0
            })
        ));
    }

    #[test]
    fn test_validation() {
        let b = EquityQueryBuilder::default().player_str("AsKs").unwrap();
        assert_eq!(
            Some(EquityError::InvalidScenario(ScenarioError::ZeroTrials)),
            b.clone()
                .config(SimulationConfig::default().trials(0))
                .build()
                .err()
        );
        assert_eq!(
            Some(EquityError::InvalidScenario(ScenarioError::ZeroBatchSize)),
            b.clone()
                .config(SimulationConfig::default().batch_size(0))
                .build()
                .err()
        );
        assert!(matches!(
            b.board_str("AsKdQc").unwrap().build(),
            Err(EquityError::InvalidScenario(ScenarioError::DuplicateCard(_)))
        ));
        assert!(matches!(
            EquityQueryBuilder::default().build(),
            Err(EquityError::InvalidScenario(ScenarioError::NoPlayers))
        ));
    }

    #[test]
    fn test_insufficient_cards() {
        let players: Vec<PlayerHand> = FULL_DECK[..48]
            .chunks(2)
            .map(|c| HoleCards::new(c[0], c[1]).unwrap().into())
            .collect();
        assert_eq!(
            Some(EquityError::Poker(PokerError::InsufficientCards {
                requested: 5,
                available: 4
            })),
            EquityQueryBuilder::default().players(players).build().err()
        );
    }

    #[test]
    fn test_bad_strings() {
        assert!(EquityQueryBuilder::default().board_str("AhK").is_err());
        assert!(EquityQueryBuilder::default().player_str("XX").is_err());
    }
}
