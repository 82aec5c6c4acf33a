//! Production implementation of LotteryContext using Tokio.

use crate::LotteryContext;
use async_trait::async_trait;
use rand::Rng;
use std::time::{Duration, Instant};

/// Production context backed by Tokio and the thread-local RNG.
///
/// Time comes from the system clock, randomness from `rand::thread_rng`.
/// The generator is fast but not cryptographically strong, which is all a
/// prize draw needs.
#[derive(Debug, Clone, Copy)]
pub struct TokioContext {
    /// Start time for monotonic duration calculations
    start: Instant,
}

impl TokioContext {
    /// Creates a new TokioContext.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for TokioContext {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LotteryContext for TokioContext {
    fn random_index(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }

    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn seed(&self) -> u64 {
        // Production is not seeded
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tokio_context_time() {
        let ctx = TokioContext::new();
        let t1 = ctx.now();
        ctx.sleep(Duration::from_millis(10)).await;
        let t2 = ctx.now();

        assert!(t2 > t1);
        assert!(t2 - t1 >= Duration::from_millis(10));
    }

    #[test]
    fn test_tokio_context_random_index_in_range() {
        let ctx = TokioContext::new();
        for upper in 1..50 {
            for _ in 0..20 {
                assert!(ctx.random_index(upper) < upper);
            }
        }
    }

    #[test]
    fn test_tokio_context_random_index_single_slot() {
        let ctx = TokioContext::new();
        assert_eq!(ctx.random_index(1), 0);
    }

    #[test]
    fn test_tokio_context_seed() {
        let ctx = TokioContext::new();
        assert_eq!(ctx.seed(), 0);
    }
}
