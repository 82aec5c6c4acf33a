//! Uniquely identified entries.
//!
//! Plain values compare by value, so a pool holding `["ann", "ann"]` cannot
//! say *which* ann won. Wrapping each value in a [`Ticket`] gives it an id
//! and makes `remove`/`has_entry` unambiguous.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a ticket.
///
/// Uses UUID v4 for uniqueness without coordination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketId(pub Uuid);

impl TicketId {
    /// Creates a new random TicketId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a deterministic TicketId from a seed (for simulation).
    pub fn from_seed(seed: u64) -> Self {
        let mut bytes = [0u8; 16];
        bytes[0..8].copy_from_slice(&seed.to_le_bytes());
        bytes[8..16].copy_from_slice(&seed.wrapping_mul(0x517cc1b727220a95).to_le_bytes());
        Self(Uuid::from_bytes(bytes))
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First 8 chars are enough to tell tickets apart in logs
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A value entered into the pool under a unique id.
///
/// Equality looks at the id only: two tickets holding the same value are
/// different entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket<T> {
    id: TicketId,
    value: T,
}

impl<T> Ticket<T> {
    /// Issues a ticket with a fresh random id.
    pub fn issue(value: T) -> Self {
        Self::with_id(TicketId::new(), value)
    }

    /// Creates a ticket with a caller-chosen id.
    pub fn with_id(id: TicketId, value: T) -> Self {
        Self { id, value }
    }

    /// Issues one ticket per value, preserving order.
    pub fn issue_all(values: impl IntoIterator<Item = T>) -> Vec<Self> {
        values.into_iter().map(Self::issue).collect()
    }

    /// Issues one ticket per value with ids derived from `seed`.
    pub fn issue_seeded(seed: u64, values: impl IntoIterator<Item = T>) -> Vec<Self> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let id = TicketId::from_seed(seed.wrapping_add(i as u64));
                Self::with_id(id, value)
            })
            .collect()
    }

    pub fn id(&self) -> TicketId {
        self.id
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> PartialEq for Ticket<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Ticket<T> {}
