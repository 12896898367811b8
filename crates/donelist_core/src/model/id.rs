//! Todo identifier generation.
//!
//! # Invariants
//! - Issued ids are strictly increasing for the generator lifetime.
//! - Ids stay close to wall-clock epoch milliseconds when the clock allows.

use crate::model::todo::TodoId;
use std::fmt::{Debug, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Creation-ordered id source.
///
/// Uses `max(now_ms, last + 1)`, so several todos created within the same
/// millisecond, or after the clock stepped backwards, still get unique ids.
pub struct IdGenerator {
    last: i64,
    clock: Box<dyn Fn() -> i64>,
}

impl IdGenerator {
    /// Creates a generator backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(system_clock_ms)
    }

    /// Creates a generator backed by a caller-provided millisecond clock.
    pub fn with_clock(clock: impl Fn() -> i64 + 'static) -> Self {
        Self {
            last: 0,
            clock: Box::new(clock),
        }
    }

    /// Raises the floor so the next id is greater than `id`.
    ///
    /// Called with the largest id of a rehydrated collection.
    pub fn observe(&mut self, id: TodoId) {
        self.last = self.last.max(id.get());
    }

    /// Issues the next id, strictly greater than every id issued or
    /// observed so far (saturating at `TodoId::MAX`).
    pub fn next_id(&mut self) -> TodoId {
        let now = (self.clock)();
        let next = now.max(self.last.saturating_add(1));
        self.last = next;
        TodoId::new(next)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for IdGenerator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator")
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

fn system_clock_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
