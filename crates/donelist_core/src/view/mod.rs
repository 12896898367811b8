//! Read-only projections rendered by presentation collaborators.
//!
//! # Invariants
//! - Projections are pure functions of one collection snapshot.
//! - Projections never allocate new todos; they borrow from the snapshot.

pub mod projections;
