//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical todo record and the ordered collection snapshot.
//! - Generate unique, creation-ordered identifiers.
//!
//! # Invariants
//! - Every todo is identified by a stable `TodoId`.
//! - A collection never holds two todos with the same id.
//! - Collections are immutable snapshots; mutation returns a new value.

pub mod collection;
pub mod id;
pub mod todo;
