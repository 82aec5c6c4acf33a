//! Simulation context implementing LotteryContext for deterministic draws.

use async_trait::async_trait;
use lottery_env::LotteryContext;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Simulation context backed by deterministic time and RNG.
///
/// This implements `LotteryContext` using:
/// - A virtual clock that can be advanced manually
/// - A seeded ChaCha8 RNG feeding the shuffle
/// - Simulated sleep that advances virtual time
///
/// Clones share the clock and the RNG stream.
pub struct SimContext {
    /// Master seed for this simulation
    seed: u64,

    /// Current virtual time (nanoseconds since simulation start)
    virtual_time_ns: Arc<Mutex<u64>>,

    /// Deterministic RNG for shuffles
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl SimContext {
    /// Creates a new SimContext with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            virtual_time_ns: Arc::new(Mutex::new(0)),
            rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }

    /// Advances virtual time by the given duration.
    ///
    /// The clock saturates at `u64::MAX` nanoseconds (about 584 years).
    pub fn advance_time(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        let mut time = self.virtual_time_ns.lock().unwrap();
        *time = time.saturating_add(nanos);
    }

    /// Sets the virtual time to a specific value.
    pub fn set_time(&self, time_ns: u64) {
        let mut time = self.virtual_time_ns.lock().unwrap();
        *time = time_ns;
    }

    /// Returns the current virtual time in nanoseconds.
    pub fn time_ns(&self) -> u64 {
        *self.virtual_time_ns.lock().unwrap()
    }
}

impl Clone for SimContext {
    fn clone(&self) -> Self {
        Self {
            seed: self.seed,
            virtual_time_ns: Arc::clone(&self.virtual_time_ns),
            rng: Arc::clone(&self.rng),
        }
    }
}

impl std::fmt::Debug for SimContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimContext")
            .field("seed", &self.seed)
            .field("time_ns", &self.time_ns())
            .finish()
    }
}

#[async_trait]
impl LotteryContext for SimContext {
    fn random_index(&self, upper: usize) -> usize {
        self.rng.lock().unwrap().gen_range(0..upper)
    }

    fn now(&self) -> Duration {
        Duration::from_nanos(*self.virtual_time_ns.lock().unwrap())
    }

    async fn sleep(&self, duration: Duration) {
        // Virtual time only; nothing actually waits
        self.advance_time(duration);
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}
