//! Statistical check that a shuffle strategy produces uniform permutations.
//!
//! Shuffles `0..n` many times, counts how often each of the `n!` orderings
//! appears and runs a chi-square goodness-of-fit test against the uniform
//! distribution.

use crate::config::ConfigError;
use lottery_core::{FisherYates, Shuffle};
use lottery_env::LotteryContext;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// z-score for a one-sided p = 0.001 test.
const Z_999: f64 = 3.090_232;

/// Largest entry count we enumerate permutations for (6! = 720 buckets).
pub const MAX_ENTRIES: usize = 6;

/// Outcome of a uniformity run.
#[derive(Debug, Clone, Serialize)]
pub struct UniformityReport {
    /// Size of the shuffled set
    pub entries: usize,

    /// Number of shuffles performed
    pub trials: u64,

    /// Observed count per permutation, keyed like `"2-0-1"`
    pub counts: BTreeMap<String, u64>,

    /// Expected count per permutation
    pub expected: f64,

    /// Chi-square statistic over all `n!` buckets
    pub chi_square: f64,

    /// Critical value at p = 0.001
    pub critical: f64,

    /// Whether the statistic is below the critical value
    pub passed: bool,
}

/// Configures and runs a uniformity check.
#[derive(Debug, Clone, Copy)]
pub struct UniformityCheck {
    entries: usize,
    trials: u64,
}

impl UniformityCheck {
    /// Creates a check over `entries` items and `trials` shuffles.
    pub fn new(entries: usize, trials: u64) -> Result<Self, ConfigError> {
        if !(2..=MAX_ENTRIES).contains(&entries) {
            return Err(ConfigError::invalid(format!(
                "uniformity check needs 2..={} entries, got {}",
                MAX_ENTRIES, entries
            )));
        }
        if trials == 0 {
            return Err(ConfigError::invalid("uniformity check needs at least one trial"));
        }
        Ok(Self { entries, trials })
    }

    /// Runs the check against the default Fisher-Yates shuffle.
    pub fn run<C: LotteryContext>(&self, ctx: C) -> UniformityReport {
        self.run_with(&FisherYates::new(ctx))
    }

    /// Runs the check against any shuffle strategy.
    pub fn run_with<S: Shuffle<usize> + ?Sized>(&self, strategy: &S) -> UniformityReport {
        info!(
            "Uniformity check: {} entries, {} trials",
            self.entries, self.trials
        );

        let items: Vec<usize> = (0..self.entries).collect();
        let buckets = factorial(self.entries);

        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for _ in 0..self.trials {
            let order = strategy.shuffle(&items);
            *counts.entry(permutation_key(&order)).or_default() += 1;
        }

        let expected = self.trials as f64 / buckets as f64;
        let observed_sq: f64 = counts
            .values()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        // Orderings never seen contribute (0 - E)^2 / E = E each
        let unseen = buckets.saturating_sub(counts.len() as u64);
        let chi_square = observed_sq + unseen as f64 * expected;

        let critical = chi_square_critical(buckets - 1);
        let passed = chi_square < critical;

        debug!(
            "  buckets={} seen={} chi2={:.2} critical={:.2}",
            buckets,
            counts.len(),
            chi_square,
            critical
        );

        UniformityReport {
            entries: self.entries,
            trials: self.trials,
            counts,
            expected,
            chi_square,
            critical,
            passed,
        }
    }
}

fn factorial(n: usize) -> u64 {
    (1..=n as u64).product()
}

fn permutation_key(order: &[usize]) -> String {
    order
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// Wilson-Hilferty approximation of the chi-square quantile.
fn chi_square_critical(df: u64) -> f64 {
    let k = df as f64;
    let h = 2.0 / (9.0 * k);
    k * (1.0 - h + Z_999 * h.sqrt()).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SimContext;
    use lottery_core::Identity;

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(UniformityCheck::new(1, 100).is_err());
        assert!(UniformityCheck::new(7, 100).is_err());
        assert!(UniformityCheck::new(3, 0).is_err());
        assert!(UniformityCheck::new(3, 10).is_ok());
    }

    #[test]
    fn test_critical_value_close_to_table() {
        // df=5, p=0.001 -> 20.515
        assert!((chi_square_critical(5) - 20.515).abs() < 0.5);
        // df=23, p=0.001 -> 49.728
        assert!((chi_square_critical(23) - 49.728).abs() < 0.5);
    }

    #[test]
    fn test_fisher_yates_is_uniform() {
        let report = UniformityCheck::new(3, 60_000)
            .unwrap()
            .run(SimContext::new(42));

        assert_eq!(report.counts.len(), 6);
        assert_eq!(report.counts.values().sum::<u64>(), 60_000);
        assert!(report.passed, "chi2={} critical={}", report.chi_square, report.critical);
        for count in report.counts.values() {
            assert!((*count as f64 - report.expected).abs() < report.expected * 0.05);
        }
    }

    #[test]
    fn test_fisher_yates_four_entries() {
        let report = UniformityCheck::new(4, 48_000)
            .unwrap()
            .run(SimContext::new(2024));
        assert_eq!(report.counts.len(), 24);
        assert!(report.passed, "chi2={} critical={}", report.chi_square, report.critical);
    }

    #[test]
    fn test_identity_fails() {
        let report = UniformityCheck::new(3, 600).unwrap().run_with(&Identity);
        assert_eq!(report.counts.len(), 1);
        assert!(!report.passed);
    }

    #[test]
    fn test_naive_swap_shuffle_is_biased() {
        // Swapping every slot with any slot gives n^n paths onto n! orders
        let ctx = SimContext::new(42);
        let naive = move |input: &[usize]| {
            let mut output = input.to_vec();
            for i in 0..output.len() {
                let j = ctx.random_index(output.len());
                output.swap(i, j);
            }
            output
        };

        let report = UniformityCheck::new(3, 60_000).unwrap().run_with(&naive);
        assert!(!report.passed);
        assert!(report.chi_square > 10.0 * report.critical);
    }
}
