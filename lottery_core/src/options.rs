//! Construction and per-draw options.

use crate::shuffle::Shuffle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boxed shuffle strategy as stored by a lottery.
pub type BoxedShuffle<T> = Box<dyn Shuffle<T> + Send + Sync>;

/// Options recognised when constructing a [`Lottery`](crate::Lottery).
pub struct LotteryOptions<T> {
    /// Custom shuffle strategy (Fisher-Yates when `None`)
    pub shuffle: Option<BoxedShuffle<T>>,

    /// Descriptive label, no behavioural effect
    pub channel_name: Option<String>,

    /// Whether drawn winners stay in the pool (default `true`)
    pub replacement: bool,
}

impl<T> LotteryOptions<T> {
    /// Sets the shuffle strategy.
    pub fn with_shuffle<S>(mut self, shuffle: S) -> Self
    where
        S: Shuffle<T> + Send + Sync + 'static,
    {
        self.shuffle = Some(Box::new(shuffle));
        self
    }

    /// Sets the channel name.
    pub fn with_channel_name(mut self, name: impl Into<String>) -> Self {
        self.channel_name = Some(name.into());
        self
    }

    /// Sets the default replacement policy.
    pub fn with_replacement(mut self, replacement: bool) -> Self {
        self.replacement = replacement;
        self
    }
}

impl<T> Default for LotteryOptions<T> {
    fn default() -> Self {
        Self {
            shuffle: None,
            channel_name: None,
            replacement: true,
        }
    }
}

impl<T> fmt::Debug for LotteryOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LotteryOptions")
            .field("custom_shuffle", &self.shuffle.is_some())
            .field("channel_name", &self.channel_name)
            .field("replacement", &self.replacement)
            .finish()
    }
}

/// Per-call draw options.
///
/// `replacement: None` inherits the pool's default policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOptions {
    /// Overrides the pool's replacement policy for one draw
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<bool>,
}

impl DrawOptions {
    /// Draw leaves the winner in the pool.
    pub fn with_replacement() -> Self {
        Self {
            replacement: Some(true),
        }
    }

    /// Draw removes the winner from the pool.
    pub fn without_replacement() -> Self {
        Self {
            replacement: Some(false),
        }
    }

    /// Resolves the effective policy against the pool default.
    pub fn replacement_or(&self, pool_default: bool) -> bool {
        self.replacement.unwrap_or(pool_default)
    }
}
