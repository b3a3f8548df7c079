use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rand::{SeedableRng, rngs::StdRng};

use super::EquityError;

/// Ask a running query to stop early.
///
/// Clones share the same flag, so hand one to another thread and call
/// `cancel` there. Work already started finishes and the query returns
/// what it has, flagged as provisional.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Checked by every batch before it starts.
#[derive(Debug)]
pub(crate) struct StopSignal<'a> {
    token: &'a CancelToken,
    deadline: Option<Instant>,
    // Set once any batch is skipped because of the token or deadline.
    interrupted: AtomicBool,
}

impl<'a> StopSignal<'a> {
    pub(crate) fn new(token: &'a CancelToken, timeout: Option<Duration>) -> Self {
        Self {
            token,
            deadline: timeout.map(|t| Instant::now() + t),
            interrupted: AtomicBool::new(false),
        }
    }

    /// Should the next unit of work be skipped?
    pub(crate) fn should_stop(&self) -> bool {
        let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        if expired || self.token.is_cancelled() {
            self.interrupted.store(true, Ordering::Relaxed);
            return true;
        }
        false
    }

    /// Was work skipped because of cancellation or the timeout.
    pub(crate) fn interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Relaxed)
    }
}

/// Run `f` on a dedicated pool of `threads` workers, or on the global
/// rayon pool when no count is given.
pub(crate) fn run_on_pool<T, F>(threads: Option<usize>, f: F) -> Result<T, EquityError>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    match threads {
        None => Ok(f()),
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| EquityError::ThreadPool(e.to_string()))?;
            Ok(pool.install(f))
        }
    }
}

/// The generator for batch `batch` of a run seeded with `seed`.
///
/// The query seed and the batch index together make up the generator's
/// key, so any batch can be started on its own without drawing the seeds
/// of the batches before it, and batch `i` is the same on every thread.
pub(crate) fn batch_rng(seed: u64, batch: u64) -> StdRng {
    let mut key = <StdRng as SeedableRng>::Seed::default();
    key[..8].copy_from_slice(&seed.to_le_bytes());
    key[8..16].copy_from_slice(&batch.to_le_bytes());
    StdRng::from_seed(key)
}
