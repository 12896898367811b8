//! Core state management for the donelist todo application.
//! This crate is the single source of truth for todo invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::collection::{CollectionError, TodoCollection};
pub use model::id::IdGenerator;
pub use model::todo::{Todo, TodoId, TodoValidationError};
pub use storage::codec::{decode_todos, encode_todos, CodecError};
pub use storage::kv::{KvStorage, MemoryKvStorage, StorageError, StorageResult};
pub use storage::persistence::{PersistenceAdapter, PersistenceError, DEFAULT_STORAGE_KEY};
pub use storage::sqlite_kv::SqliteKvStorage;
pub use store::todo_store::{AddTodoError, SubscriptionId, TodoStore};
pub use view::projections::{
    active_view, completed_view, count_view, total_count, TodoViews, ACTIVE_EMPTY_HINT,
    COMPLETED_EMPTY_HINT, COMPLETED_VIEW_LIMIT,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
