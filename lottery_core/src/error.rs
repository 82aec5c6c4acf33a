//! Error types for lottery draws.

use thiserror::Error;

/// Errors raised by draw operations on a [`Lottery`](crate::Lottery).
///
/// Removing an absent entry, adding an empty batch and resetting an empty
/// pool are no-ops and never produce an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotteryError {
    /// A single winner was requested but the pool holds no entries.
    #[error("no more entries left")]
    EmptyPool,

    /// More winners were requested than the pool currently holds.
    #[error("requested {requested} winners but only {available} entries remain")]
    InsufficientEntries {
        /// Number of winners asked for
        requested: usize,
        /// Number of entries in the shuffled view
        available: usize,
    },
}

impl LotteryError {
    /// Creates an insufficient-entries error.
    pub fn insufficient(requested: usize, available: usize) -> Self {
        Self::InsufficientEntries {
            requested,
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(LotteryError::EmptyPool.to_string(), "no more entries left");
        assert_eq!(
            LotteryError::insufficient(6, 5).to_string(),
            "requested 6 winners but only 5 entries remain"
        );
    }
}
