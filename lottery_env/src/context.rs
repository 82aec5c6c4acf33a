//! Core environment context trait for the lottery pool.

use async_trait::async_trait;
use std::time::Duration;

/// The central interface for Environment Interaction.
///
/// This trait abstracts the "real world" so that shuffles and timed draws
/// can run against either real entropy or a seeded simulation.
///
/// # Implementations
///
/// - **Production**: `TokioContext` - wraps `tokio::time`, `thread_rng`
/// - **Simulation**: `SimContext` - virtual clock, `ChaCha8Rng(seed)`
///
/// # Determinism
///
/// Methods that would normally introduce non-determinism (time,
/// randomness) are controlled by the implementation.
#[async_trait]
pub trait LotteryContext: Send + Sync + 'static {
    /// Returns an index drawn uniformly from `[0, upper)`.
    ///
    /// This is the only randomness the default shuffle consumes.
    ///
    /// # Panics
    /// Implementations may panic if `upper` is zero.
    fn random_index(&self, upper: usize) -> usize;

    /// Returns the current monotonic time since context creation.
    ///
    /// In simulation, this is the virtual clock time.
    fn now(&self) -> Duration;

    /// Suspends execution for the given duration.
    ///
    /// In production: wraps `tokio::time::sleep`
    /// In simulation: advances virtual clock
    async fn sleep(&self, duration: Duration);

    /// Returns the context's seed (for logging/debugging).
    ///
    /// In production, returns 0 (not seeded).
    /// In simulation, returns the master seed.
    fn seed(&self) -> u64;
}
