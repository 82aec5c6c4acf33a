//! Timed draw sessions - sequential `next_winner` calls spaced by a delay.

use lottery_core::{DrawOptions, Lottery, LotteryError};
use lottery_env::LotteryContext;
use serde::Serialize;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One draw within a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawRecord<T> {
    /// 1-based round number
    pub round: usize,

    /// The drawn entry
    pub winner: T,

    /// Position of the winner in the starting lineup
    pub slot: Option<usize>,

    /// Context time of the draw in milliseconds
    pub at_ms: u64,
}

/// Results from running a draw session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport<T> {
    /// Channel name of the pool, if any
    pub channel_name: Option<String>,

    /// Context seed used
    pub seed: u64,

    /// Rounds requested
    pub requested: usize,

    /// Draws in order
    pub records: Vec<DrawRecord<T>>,

    /// Entries left in the pool afterwards
    pub remaining: usize,

    /// Whether the pool ran dry before all rounds were drawn
    pub exhausted: bool,
}

impl<T> SessionReport<T> {
    /// True when every requested round produced a winner.
    pub fn passed(&self) -> bool {
        !self.exhausted && self.records.len() == self.requested
    }

    pub fn winners(&self) -> impl Iterator<Item = &T> {
        self.records.iter().map(|r| &r.winner)
    }
}

/// Runs sequential draws against a pool, sleeping on the context between
/// rounds.
pub struct DrawSession<C> {
    /// Clock and randomness source
    ctx: C,

    /// Number of draws to attempt
    rounds: usize,

    /// Delay before every draw after the first
    interval: Duration,

    /// Per-draw options passed to `next_winner`
    options: DrawOptions,
}

impl<C: LotteryContext> DrawSession<C> {
    /// Creates a single-round session.
    pub fn new(ctx: C) -> Self {
        Self {
            ctx,
            rounds: 1,
            interval: Duration::from_millis(500),
            options: DrawOptions::default(),
        }
    }

    /// Sets the number of rounds.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Sets the delay between rounds.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the draw options used for every round.
    pub fn with_options(mut self, options: DrawOptions) -> Self {
        self.options = options;
        self
    }

    /// Draws up to `rounds` winners. Stops early, with `exhausted` set, when
    /// the pool runs out of entries.
    pub async fn run<T>(&self, lottery: &mut Lottery<T>) -> SessionReport<T>
    where
        T: Clone + PartialEq + Debug,
    {
        info!(
            "Starting draw session: {} rounds, {}ms apart (seed={})",
            self.rounds,
            self.interval.as_millis(),
            self.ctx.seed()
        );

        let lineup = lottery.draw_original();
        let mut records = Vec::with_capacity(self.rounds);
        let mut exhausted = false;

        for round in 1..=self.rounds {
            if round > 1 {
                self.ctx.sleep(self.interval).await;
            }

            match lottery.next_winner(self.options).await {
                Ok(winner) => {
                    let slot = lineup.iter().position(|e| *e == winner);
                    let at_ms = u64::try_from(self.ctx.now().as_millis()).unwrap_or(u64::MAX);
                    debug!("  round {} | t={}ms | winner={:?} | remaining={}", round, at_ms, winner, lottery.size());
                    records.push(DrawRecord {
                        round,
                        winner,
                        slot,
                        at_ms,
                    });
                }
                Err(LotteryError::EmptyPool) => {
                    warn!("Pool exhausted after {} of {} rounds", round - 1, self.rounds);
                    exhausted = true;
                    break;
                }
                Err(e) => {
                    warn!("Draw failed in round {}: {}", round, e);
                    exhausted = true;
                    break;
                }
            }
        }

        info!("Session complete: {} winners, {} entries remaining", records.len(), lottery.size());

        SessionReport {
            channel_name: lottery.channel_name().map(str::to_owned),
            seed: self.ctx.seed(),
            requested: self.rounds,
            records,
            remaining: lottery.size(),
            exhausted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SimContext;
    use lottery_core::{FisherYates, Identity, LotteryOptions};
    use proptest::prelude::*;

    fn seeded_lottery(ctx: &SimContext, replacement: bool) -> Lottery<String> {
        let entries = (1..=9).map(|i| i.to_string()).collect();
        let options = LotteryOptions::default()
            .with_shuffle(FisherYates::new(ctx.clone()))
            .with_replacement(replacement)
            .with_channel_name("grid");
        Lottery::new(entries, options)
    }

    #[tokio::test]
    async fn test_session_with_replacement_draws_every_round() {
        let ctx = SimContext::new(42);
        let mut lottery = seeded_lottery(&ctx, true);

        let report = DrawSession::new(ctx.clone())
            .with_rounds(20)
            .with_interval(Duration::from_millis(500))
            .run(&mut lottery)
            .await;

        assert!(report.passed());
        assert_eq!(report.records.len(), 20);
        assert_eq!(report.remaining, 9);
        assert_eq!(report.channel_name.as_deref(), Some("grid"));
        assert_eq!(report.seed, 42);

        // Nothing mutates between rounds, so the cached order repeats
        let first = &report.records[0].winner;
        assert!(report.winners().all(|w| w == first));
    }

    #[tokio::test]
    async fn test_session_timestamps_follow_interval() {
        let ctx = SimContext::new(1);
        let mut lottery = seeded_lottery(&ctx, true);

        let report = DrawSession::new(ctx.clone())
            .with_rounds(4)
            .with_interval(Duration::from_millis(250))
            .run(&mut lottery)
            .await;

        let times: Vec<u64> = report.records.iter().map(|r| r.at_ms).collect();
        assert_eq!(times, vec![0, 250, 500, 750]);
        assert_eq!(ctx.now(), Duration::from_millis(750));
    }

    #[tokio::test]
    async fn test_session_without_replacement_exhausts_pool() {
        let ctx = SimContext::new(7);
        let mut lottery = seeded_lottery(&ctx, false);

        let report = DrawSession::new(ctx.clone())
            .with_rounds(12)
            .run(&mut lottery)
            .await;

        assert!(report.exhausted);
        assert!(!report.passed());
        assert_eq!(report.records.len(), 9);
        assert_eq!(report.remaining, 0);

        let mut winners: Vec<&String> = report.winners().collect();
        winners.sort();
        winners.dedup();
        assert_eq!(winners.len(), 9);
    }

    #[tokio::test]
    async fn test_session_option_override_and_slots() {
        let ctx = SimContext::new(3);
        let mut lottery = Lottery::new(
            vec!["a", "b", "c"],
            LotteryOptions::default().with_shuffle(Identity),
        );

        let report = DrawSession::new(ctx)
            .with_rounds(3)
            .with_options(DrawOptions::without_replacement())
            .run(&mut lottery)
            .await;

        assert!(report.passed());
        let slots: Vec<Option<usize>> = report.records.iter().map(|r| r.slot).collect();
        assert_eq!(slots, vec![Some(0), Some(1), Some(2)]);
        assert!(lottery.is_empty());
    }

    #[tokio::test]
    async fn test_same_seed_same_session() {
        async fn winners(seed: u64) -> Vec<String> {
            let ctx = SimContext::new(seed);
            let mut lottery = seeded_lottery(&ctx, false);
            DrawSession::new(ctx.clone())
                .with_rounds(5)
                .run(&mut lottery)
                .await
                .records
                .into_iter()
                .map(|r| r.winner)
                .collect()
        }

        assert_eq!(winners(99).await, winners(99).await);
    }

    #[tokio::test]
    async fn test_huge_interval_saturates_clock() {
        let ctx = SimContext::new(1);
        let mut lottery = seeded_lottery(&ctx, true);

        let report = DrawSession::new(ctx.clone())
            .with_rounds(3)
            .with_interval(Duration::from_millis(10_000_000_000_000))
            .run(&mut lottery)
            .await;

        assert!(report.passed());
        assert_eq!(ctx.time_ns(), u64::MAX);
        assert_eq!(report.records[2].at_ms, u64::MAX / 1_000_000);
    }

    fn run_seeded(seed: u64, rounds: usize, replacement: bool) -> SessionReport<String> {
        let ctx = SimContext::new(seed);
        let mut lottery = seeded_lottery(&ctx, replacement);
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(DrawSession::new(ctx.clone()).with_rounds(rounds).run(&mut lottery))
    }

    proptest! {
        #[test]
        fn prop_same_seed_same_report(seed in any::<u64>(), rounds in 1usize..15, replacement in any::<bool>()) {
            let a = run_seeded(seed, rounds, replacement);
            let b = run_seeded(seed, rounds, replacement);
            prop_assert_eq!(a.records, b.records);
            prop_assert_eq!(a.remaining, b.remaining);
            prop_assert_eq!(a.exhausted, b.exhausted);
        }

        #[test]
        fn prop_no_replacement_never_repeats_slot(seed in any::<u64>(), rounds in 1usize..15) {
            let report = run_seeded(seed, rounds, false);
            let mut slots: Vec<usize> = report.records.iter().filter_map(|r| r.slot).collect();
            prop_assert_eq!(slots.len(), report.records.len());
            prop_assert_eq!(report.records.len(), rounds.min(9));
            prop_assert_eq!(report.exhausted, rounds > 9);

            slots.sort_unstable();
            slots.dedup();
            prop_assert_eq!(slots.len(), report.records.len());
        }
    }
}
