use std::time::Duration;

/// How the equity should be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeSelection {
    /// Enumerate when the number of deals is small enough, sample otherwise.
    #[default]
    Auto,
    /// Always enumerate every deal.
    Exhaustive,
    /// Always run Monte Carlo trials.
    Sampled,
}

/// Knobs for a single equity query.
///
/// Every field has a sensible default so most callers only set `trials`
/// and maybe `seed`:
///
/// ```
/// use holdem_equity::holdem::{ModeSelection, SimulationConfig};
///
/// let config = SimulationConfig::default()
///     .trials(50_000)
///     .seed(420)
///     .mode(ModeSelection::Sampled);
/// assert_eq!(50_000, config.trials);
/// assert_eq!(Some(420), config.seed);
/// ```
///
/// With the `serde` feature it can be read from JSON, missing fields
/// take their default:
///
/// ```
/// use holdem_equity::holdem::SimulationConfig;
///
/// let config: SimulationConfig = serde_json::from_str(r#"{"trials": 1000}"#).unwrap();
/// assert_eq!(1000, config.trials);
/// assert_eq!(4096, config.batch_size);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Monte Carlo trials to run.
    pub trials: u64,
    /// Seed for reproducible runs. One is picked at random if missing.
    pub seed: Option<u64>,
    pub mode: ModeSelection,
    /// `Auto` enumerates when there are at most this many deals.
    pub exhaustive_threshold: u64,
    /// Trials per unit of parallel work.
    pub batch_size: u64,
    /// How many times a deal is retried when ranges collide.
    pub max_resamples: u32,
    /// Return whatever is done once this much time passes.
    pub timeout: Option<Duration>,
    /// Use a dedicated pool of this many threads instead of the global
    /// rayon pool.
    pub threads: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 100_000,
            seed: None,
            mode: ModeSelection::Auto,
            exhaustive_threshold: 200_000,
            batch_size: 4096,
            max_resamples: 1024,
            timeout: None,
            threads: None,
        }
    }
}

impl SimulationConfig {
    pub fn trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn mode(mut self, mode: ModeSelection) -> Self {
        self.mode = mode;
        self
    }

    pub fn exhaustive_threshold(mut self, threshold: u64) -> Self {
        self.exhaustive_threshold = threshold;
        self
    }

    pub fn batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn max_resamples(mut self, max_resamples: u32) -> Self {
        self.max_resamples = max_resamples;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SimulationConfig::default();
        assert_eq!(ModeSelection::Auto, c.mode);
        assert_eq!(200_000, c.exhaustive_threshold);
        assert_eq!(4096, c.batch_size);
        assert_eq!(1024, c.max_resamples);
        assert_eq!(None, c.seed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip() {
        let c = SimulationConfig::default()
            .seed(7)
            .mode(ModeSelection::Exhaustive)
            .timeout(Duration::from_millis(250))
            .threads(2);
        let json = serde_json::to_string(&c).unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_mode_names() {
        let c: SimulationConfig = serde_json::from_str(r#"{"mode": "Sampled"}"#).unwrap();
        assert_eq!(ModeSelection::Sampled, c.mode);
        assert!(serde_json::from_str::<SimulationConfig>(r#"{"mode": "Guess"}"#).is_err());
    }
}
