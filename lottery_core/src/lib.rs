//! Lottery Core - generic entry pool with shuffled, replacement-aware draws
//!
//! A [`Lottery`] holds the canonical list of entries and a cached shuffled
//! view of them. Winners are read from the front of the view:
//! 1. **With replacement** (default): winners stay eligible for later draws
//! 2. **Without replacement**: each winner leaves the pool and the rest is
//!    reshuffled
//!
//! The ordering comes from a pluggable [`Shuffle`] strategy. The default is
//! a Fisher-Yates shuffle fed by a [`lottery_env::LotteryContext`], so a
//! seeded context gives reproducible draws.
//!
//! ```
//! use lottery_core::{DrawOptions, Lottery};
//!
//! let mut lottery = Lottery::with_entries(vec!["ann", "bob", "cyd"]);
//! let winner = lottery.draw_winner(DrawOptions::without_replacement()).unwrap();
//! assert!(!lottery.has_entry(&winner));
//! assert_eq!(lottery.size(), 2);
//! ```

pub mod error;
pub mod lottery;
pub mod options;
pub mod shuffle;
pub mod ticket;

// Re-export key types for convenience
pub use error::LotteryError;
pub use lottery::Lottery;
pub use options::{BoxedShuffle, DrawOptions, LotteryOptions};
pub use shuffle::{FisherYates, Identity, Shuffle};
pub use ticket::{Ticket, TicketId};
