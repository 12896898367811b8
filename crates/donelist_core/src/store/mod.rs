//! Todo state owner.
//!
//! # Responsibility
//! - Hold the authoritative collection snapshot for one session.
//! - Expose the only legal mutations: add, toggle finish, delete.
//! - Persist and publish a new snapshot after each effective mutation.
//!
//! # Invariants
//! - Mutations take `&mut self`, so they are applied one at a time and each
//!   observes the result of the previous one.
//! - Rejected or no-op calls neither write to storage nor notify listeners.

pub mod todo_store;
