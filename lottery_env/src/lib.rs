//! Lottery Environment Abstraction Layer
//!
//! This crate provides the "Sans-IO" abstraction that lets the lottery pool
//! run both in **Production** (tokio + thread RNG) and under a seeded
//! **Simulation** context.
//!
//! # Core Concept
//!
//! Every source of non-determinism the pool touches is routed through
//! [`LotteryContext`]:
//! - Randomness (`random_index()`), consumed by the Fisher-Yates shuffle
//! - Time (`now()`, `sleep()`), consumed by timed draw sessions
//!
//! A simulation context derives all entropy from one 64-bit seed, so any
//! surprising draw order can be replayed from its seed number.
//!
//! # Example
//!
//! ```ignore
//! use lottery_env::{LotteryContext, TokioContext};
//!
//! async fn announce<Ctx: LotteryContext>(ctx: &Ctx, names: &[&str]) {
//!     for name in names {
//!         ctx.sleep(Duration::from_secs(1)).await;
//!         println!("{} at {:?}", name, ctx.now());
//!     }
//! }
//! ```

mod context;
mod tokio_impl;

pub use context::LotteryContext;
pub use tokio_impl::TokioContext;
