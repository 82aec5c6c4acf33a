//! The entry pool and its shuffle/draw state machine.
//!
//! A [`Lottery`] owns two sequences:
//! - `entries`: the canonical, insertion-ordered participants
//! - `shuffled_entries`: a cached permutation of `entries`
//!
//! The cache is rebuilt from scratch by the shuffle strategy after every
//! mutation of `entries` and after every strategy change. Draws read the
//! front of the cache, so repeated draws without a mutation in between see
//! the same order.
//!
//! ```text
//!   add / remove / set_shuffle ──► entries ──shuffle()──► shuffled_entries
//!                                     ▲                         │
//!                                     └── remove(winner) ◄── draw_winner
//!                                         (replacement = false)
//! ```

use crate::error::LotteryError;
use crate::options::{BoxedShuffle, DrawOptions, LotteryOptions};
use crate::shuffle::{FisherYates, Shuffle};
use lottery_env::TokioContext;
use std::fmt;
use tracing::debug;

/// A pool of entries that can be shuffled and drawn from.
///
/// Not synchronised: wrap it in a mutex, or keep one pool per owner, when
/// several tasks need to draw.
pub struct Lottery<T> {
    entries: Vec<T>,
    shuffled_entries: Vec<T>,
    shuffle: BoxedShuffle<T>,
    channel_name: Option<String>,
    replacement: bool,
}

impl<T: Clone + PartialEq> Lottery<T> {
    /// Creates a lottery that takes ownership of `entries` and shuffles them
    /// immediately.
    pub fn new(entries: Vec<T>, options: LotteryOptions<T>) -> Self {
        let shuffle: BoxedShuffle<T> = match options.shuffle {
            Some(shuffle) => shuffle,
            None => Box::new(FisherYates::new(TokioContext::new())),
        };

        let mut lottery = Self {
            entries,
            shuffled_entries: Vec::new(),
            shuffle,
            channel_name: options.channel_name,
            replacement: options.replacement,
        };
        lottery.reshuffle();
        lottery
    }

    /// Creates a lottery with default options.
    pub fn with_entries(entries: Vec<T>) -> Self {
        Self::new(entries, LotteryOptions::default())
    }

    /// Appends entries. An empty batch leaves the pool untouched.
    pub fn add<I>(&mut self, new_entries: I)
    where
        I: IntoIterator<Item = T>,
    {
        let before = self.entries.len();
        self.entries.extend(new_entries);
        if self.entries.len() == before {
            return;
        }

        debug!(added = self.entries.len() - before, size = self.entries.len(), "entries added");
        self.reshuffle();
    }

    /// Removes the first entry equal to `entry`. Absent entries are ignored.
    pub fn remove(&mut self, entry: &T) {
        if let Some(index) = self.entries.iter().position(|e| e == entry) {
            self.entries.remove(index);
            debug!(index, size = self.entries.len(), "entry removed");
            self.reshuffle();
        }
    }

    pub fn has_entry(&self, entry: &T) -> bool {
        self.entries.contains(entry)
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears both the entries and the shuffled view.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.shuffled_entries.clear();
    }

    /// Returns the full shuffled ordering.
    pub fn draw(&self) -> Vec<T> {
        self.shuffled_entries.clone()
    }

    /// Returns the entries in insertion order.
    pub fn draw_original(&self) -> Vec<T> {
        self.entries.clone()
    }

    /// Draws the first entry of the shuffled view.
    ///
    /// Without replacement the winner is removed (and the pool reshuffled)
    /// before it is returned.
    ///
    /// # Errors
    /// [`LotteryError::EmptyPool`] if there is nothing to draw.
    pub fn draw_winner(&mut self, options: DrawOptions) -> Result<T, LotteryError> {
        let winner = self
            .shuffled_entries
            .first()
            .cloned()
            .ok_or(LotteryError::EmptyPool)?;

        let replacement = options.replacement_or(self.replacement);
        if !replacement {
            self.remove(&winner);
        }

        debug!(replacement, size = self.entries.len(), "winner drawn");
        Ok(winner)
    }

    /// Draws the first `num` entries of the shuffled view.
    ///
    /// Without replacement the returned winners are the top `num` of the
    /// view as it stood before the call; each is then removed by value, one
    /// reshuffle per removal.
    ///
    /// # Errors
    /// [`LotteryError::InsufficientEntries`] if `num` exceeds the pool size.
    pub fn draw_winners(&mut self, num: usize, options: DrawOptions) -> Result<Vec<T>, LotteryError> {
        let available = self.shuffled_entries.len();
        if num > available {
            return Err(LotteryError::insufficient(num, available));
        }

        let winners = self.shuffled_entries[..num].to_vec();

        let replacement = options.replacement_or(self.replacement);
        if !replacement {
            for winner in &winners {
                self.remove(winner);
            }
        }

        debug!(count = num, replacement, size = self.entries.len(), "winners drawn");
        Ok(winners)
    }

    /// Async form of [`draw_winner`](Self::draw_winner).
    ///
    /// Completes on first poll; it exists so timed draw loops can `.await`
    /// every step the same way.
    ///
    /// # Errors
    /// [`LotteryError::EmptyPool`] when no entries are left.
    pub async fn next_winner(&mut self, options: DrawOptions) -> Result<T, LotteryError> {
        self.draw_winner(options)
    }

    /// Replaces the shuffle strategy and reshuffles immediately.
    pub fn set_shuffle<S>(&mut self, shuffle: S)
    where
        S: Shuffle<T> + Send + Sync + 'static,
    {
        self.shuffle = Box::new(shuffle);
        self.reshuffle();
    }

    /// Returns the current shuffle strategy.
    pub fn shuffle(&self) -> &(dyn Shuffle<T> + Send + Sync) {
        self.shuffle.as_ref()
    }

    pub fn set_channel_name(&mut self, name: impl Into<String>) {
        self.channel_name = Some(name.into());
    }

    pub fn channel_name(&self) -> Option<&str> {
        self.channel_name.as_deref()
    }

    /// Default replacement policy for draws that don't override it.
    pub fn replacement(&self) -> bool {
        self.replacement
    }

    fn reshuffle(&mut self) {
        self.shuffled_entries = self.shuffle.shuffle(&self.entries);
        debug_assert_eq!(self.shuffled_entries.len(), self.entries.len());
    }
}

impl<T: fmt::Debug> fmt::Debug for Lottery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lottery")
            .field("entries", &self.entries)
            .field("shuffled_entries", &self.shuffled_entries)
            .field("channel_name", &self.channel_name)
            .field("replacement", &self.replacement)
            .finish_non_exhaustive()
    }
}
