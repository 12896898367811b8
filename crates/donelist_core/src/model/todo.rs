//! Todo domain record.
//!
//! # Responsibility
//! - Define the single entity of the todo core.
//! - Enforce content validation at construction and decode time.
//!
//! # Invariants
//! - `content` is trimmed and never empty.
//! - `id` and `content` never change after creation; only the finished flag
//!   may be flipped, and flipping yields a new value.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable, creation-ordered todo identifier.
///
/// Larger ids were created later, which `completed_view` relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Largest representable id. No id can be issued after it, so
    /// collections never hold it.
    pub const MAX: TodoId = TodoId(i64::MAX);

    /// Wraps a raw id, e.g. one typed by a user or read from storage.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value as stored on the wire.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures for todo records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Content is empty or whitespace-only after trimming.
    EmptyContent,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "todo content must not be empty"),
        }
    }
}

impl Error for TodoValidationError {}

/// A single task record.
///
/// Serialized as `{"id": .., "content": .., "isFinish": ..}` to stay
/// compatible with previously stored lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TodoRecord")]
pub struct Todo {
    id: TodoId,
    content: String,
    #[serde(rename = "isFinish")]
    is_finished: bool,
}

impl Todo {
    /// Creates an unfinished todo with trimmed content.
    ///
    /// # Errors
    /// - Returns `TodoValidationError::EmptyContent` when `content` is empty
    ///   after trimming.
    pub fn new(id: TodoId, content: impl AsRef<str>) -> Result<Self, TodoValidationError> {
        let trimmed = content.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TodoValidationError::EmptyContent);
        }
        Ok(Self {
            id,
            content: trimmed.to_string(),
            is_finished: false,
        })
    }

    /// Stable id assigned at creation.
    pub fn id(&self) -> TodoId {
        self.id
    }

    /// Trimmed, non-empty text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the todo is completed. Defaults to `false`.
    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    /// Returns a copy with the finished flag negated.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            is_finished: !self.is_finished,
            ..self.clone()
        }
    }
}

/// Unvalidated wire shape used as the deserialization entry point.
#[derive(Deserialize)]
struct TodoRecord {
    id: TodoId,
    content: String,
    #[serde(rename = "isFinish")]
    is_finish: bool,
}

impl TryFrom<TodoRecord> for Todo {
    type Error = TodoValidationError;

    fn try_from(record: TodoRecord) -> Result<Self, Self::Error> {
        let mut todo = Todo::new(record.id, record.content)?;
        todo.is_finished = record.is_finish;
        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::{Todo, TodoId, TodoValidationError};

    #[test]
    fn new_trims_and_defaults_to_unfinished() {
        let todo = Todo::new(TodoId::new(7), "  buy milk \n").unwrap();
        assert_eq!(todo.id(), TodoId::new(7));
        assert_eq!(todo.content(), "buy milk");
        assert!(!todo.is_finished());
    }

    #[test]
    fn new_rejects_blank_content() {
        assert_eq!(
            Todo::new(TodoId::new(1), "").unwrap_err(),
            TodoValidationError::EmptyContent
        );
        assert_eq!(
            Todo::new(TodoId::new(1), " \t ").unwrap_err(),
            TodoValidationError::EmptyContent
        );
    }

    #[test]
    fn toggled_only_flips_flag() {
        let todo = Todo::new(TodoId::new(3), "walk").unwrap();
        let flipped = todo.toggled();
        assert!(flipped.is_finished());
        assert_eq!(flipped.id(), todo.id());
        assert_eq!(flipped.content(), todo.content());
        assert_eq!(flipped.toggled(), todo);
    }
}
