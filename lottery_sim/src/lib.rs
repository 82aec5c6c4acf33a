//! Lottery Deterministic Simulation Harness
//!
//! This crate runs the lottery pool inside a controlled environment where
//! every draw can be replayed.
//!
//! # Core Principle
//!
//! All sources of non-determinism are intercepted and controlled:
//! - **Time**: Virtual clock advanced by `sleep`, never by the wall clock
//! - **Randomness**: All shuffles derived from a single 64-bit seed
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     DrawSession                      │
//! │   round 1 ── sleep(interval) ── round 2 ── ...       │
//! │       │                             │                │
//! │  ┌────▼─────────────────────────────▼────┐           │
//! │  │ Lottery<T>  (entries + shuffled view) │           │
//! │  └────────────────────┬──────────────────┘           │
//! │                       │ FisherYates                  │
//! │  ┌────────────────────▼──────────────────┐           │
//! │  │ SimContext (ChaCha8 seed + clock)     │           │
//! │  └───────────────────────────────────────┘           │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use lottery_sim::{DrawSession, SimContext};
//!
//! let ctx = SimContext::new(42);
//! let report = DrawSession::new(ctx.clone())
//!     .with_rounds(20)
//!     .run(&mut lottery)
//!     .await;
//! ```

mod config;
mod context;
mod session;
mod uniformity;

pub use config::{ConfigError, SessionConfig, MAX_INTERVAL_MS};
pub use context::SimContext;
pub use session::{DrawRecord, DrawSession, SessionReport};
pub use uniformity::{UniformityCheck, UniformityReport, MAX_ENTRIES};
