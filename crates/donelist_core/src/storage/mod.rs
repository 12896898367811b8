//! Durable storage for todo collections.
//!
//! # Responsibility
//! - Define the string key-value backend contract and its implementations.
//! - Encode collections into the persisted JSON record format.
//! - Provide the best-effort persistence adapter used by the store.
//!
//! # Invariants
//! - Persistence failures never propagate into store mutations.
//! - `decode_todos(encode_todos(c)) == c` for every valid collection.

pub mod codec;
pub mod kv;
pub mod persistence;
pub mod sqlite_kv;
