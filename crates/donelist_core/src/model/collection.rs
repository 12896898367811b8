//! Ordered todo collection snapshot.
//!
//! # Responsibility
//! - Hold todos in insertion order.
//! - Provide copy-on-write transitions used by the store.
//!
//! # Invariants
//! - Ids are pairwise distinct.
//! - Transition methods never modify the receiver.

use crate::model::todo::{Todo, TodoId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Structural errors when assembling a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// Two todos share one id.
    DuplicateId(TodoId),
    /// A todo holds the largest id, leaving nothing for the next `add`.
    IdSpaceExhausted(TodoId),
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate todo id: {id}"),
            Self::IdSpaceExhausted(id) => write!(f, "todo id {id} leaves no room for new ids"),
        }
    }
}

impl Error for CollectionError {}

/// Immutable, insertion-ordered list of todos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Todo>", into = "Vec<Todo>")]
pub struct TodoCollection {
    items: Vec<Todo>,
}

impl TodoCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from an ordered list of todos.
    ///
    /// # Errors
    /// - Returns `CollectionError::DuplicateId` for the first repeated id.
    /// - Returns `CollectionError::IdSpaceExhausted` when a todo holds
    ///   `TodoId::MAX`.
    pub fn try_from_vec(items: Vec<Todo>) -> Result<Self, CollectionError> {
        let mut seen = HashSet::with_capacity(items.len());
        for todo in &items {
            ensure_id_space(todo.id())?;
            if !seen.insert(todo.id()) {
                return Err(CollectionError::DuplicateId(todo.id()));
            }
        }
        Ok(Self { items })
    }

    /// Number of todos in any state.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the collection holds no todos.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.items.iter()
    }

    /// Looks up a todo by id.
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id() == id)
    }

    /// True when a todo with `id` exists.
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> Vec<TodoId> {
        self.items.iter().map(Todo::id).collect()
    }

    /// Largest id present, or `None` when empty.
    pub fn max_id(&self) -> Option<TodoId> {
        self.items.iter().map(Todo::id).max()
    }

    /// Returns a new collection with `todo` appended at the end.
    ///
    /// # Errors
    /// - Returns `CollectionError::DuplicateId` when the id is already taken.
    /// - Returns `CollectionError::IdSpaceExhausted` for `TodoId::MAX`.
    pub fn with_appended(&self, todo: Todo) -> Result<Self, CollectionError> {
        ensure_id_space(todo.id())?;
        if self.contains(todo.id()) {
            return Err(CollectionError::DuplicateId(todo.id()));
        }
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend(self.items.iter().cloned());
        items.push(todo);
        Ok(Self { items })
    }

    /// Returns a new collection with the finished flag of `id` negated, or
    /// `None` when no such todo exists.
    pub fn with_toggled(&self, id: TodoId) -> Option<Self> {
        let position = self.items.iter().position(|todo| todo.id() == id)?;
        let mut items = self.items.clone();
        items[position] = items[position].toggled();
        Some(Self { items })
    }

    /// Returns a new collection without `id`, or `None` when absent.
    pub fn without(&self, id: TodoId) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }
        let items = self
            .items
            .iter()
            .filter(|todo| todo.id() != id)
            .cloned()
            .collect();
        Some(Self { items })
    }
}

fn ensure_id_space(id: TodoId) -> Result<(), CollectionError> {
    if id == TodoId::MAX {
        return Err(CollectionError::IdSpaceExhausted(id));
    }
    Ok(())
}

impl TryFrom<Vec<Todo>> for TodoCollection {
    type Error = CollectionError;

    fn try_from(items: Vec<Todo>) -> Result<Self, Self::Error> {
        Self::try_from_vec(items)
    }
}

impl From<TodoCollection> for Vec<Todo> {
    fn from(collection: TodoCollection) -> Self {
        collection.items
    }
}

impl<'a> IntoIterator for &'a TodoCollection {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
