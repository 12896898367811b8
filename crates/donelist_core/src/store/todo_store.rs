//! Todo store: authoritative state plus mutation entry points.

use crate::model::collection::{CollectionError, TodoCollection};
use crate::model::id::IdGenerator;
use crate::model::todo::{Todo, TodoId, TodoValidationError};
use crate::storage::kv::KvStorage;
use crate::storage::persistence::PersistenceAdapter;
use crate::view::projections::TodoViews;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Reason an `add` call was rejected. The store is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddTodoError {
    /// Input was empty or whitespace-only.
    EmptyContent,
    /// Generated id is already present in the collection.
    IdCollision(TodoId),
    /// The id counter reached `TodoId::MAX`.
    IdSpaceExhausted,
}

impl Display for AddTodoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "todo content must not be empty"),
            Self::IdCollision(id) => write!(f, "generated todo id already exists: {id}"),
            Self::IdSpaceExhausted => write!(f, "no todo ids left"),
        }
    }
}

impl Error for AddTodoError {}

impl From<TodoValidationError> for AddTodoError {
    fn from(value: TodoValidationError) -> Self {
        match value {
            TodoValidationError::EmptyContent => Self::EmptyContent,
        }
    }
}

impl From<CollectionError> for AddTodoError {
    fn from(value: CollectionError) -> Self {
        match value {
            CollectionError::DuplicateId(id) => Self::IdCollision(id),
            CollectionError::IdSpaceExhausted(_) => Self::IdSpaceExhausted,
        }
    }
}

/// Handle returned by `subscribe`, used to detach a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type SnapshotListener = Box<dyn FnMut(&Arc<TodoCollection>)>;

/// Owns the todo collection for one session.
///
/// Construct with `TodoStore::open`, which rehydrates from storage once.
pub struct TodoStore<S: KvStorage> {
    current: Arc<TodoCollection>,
    ids: IdGenerator,
    persistence: PersistenceAdapter<S>,
    listeners: Vec<(SubscriptionId, SnapshotListener)>,
    next_subscription: u64,
}

impl<S: KvStorage> TodoStore<S> {
    /// Rehydrates a store using the system clock for ids.
    pub fn open(persistence: PersistenceAdapter<S>) -> Self {
        Self::open_with_ids(persistence, IdGenerator::new())
    }

    /// Rehydrates a store with a caller-provided id generator.
    ///
    /// The generator floor is raised to the largest loaded id.
    pub fn open_with_ids(persistence: PersistenceAdapter<S>, mut ids: IdGenerator) -> Self {
        let loaded = persistence.load();
        if let Some(max_id) = loaded.max_id() {
            ids.observe(max_id);
        }
        info!(
            "event=store_open module=store status=ok key={} count={}",
            persistence.key(),
            loaded.len()
        );
        Self {
            current: Arc::new(loaded),
            ids,
            persistence,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Latest snapshot. Cheap to clone and safe to hold across mutations.
    pub fn snapshot(&self) -> Arc<TodoCollection> {
        Arc::clone(&self.current)
    }

    /// Projections of the latest snapshot for one render pass.
    pub fn views(&self) -> TodoViews<'_> {
        TodoViews::of(&self.current)
    }

    /// Appends a new unfinished todo with trimmed `content`.
    ///
    /// # Errors
    /// - `AddTodoError::EmptyContent` when `content` is blank; nothing is
    ///   written or published.
    pub fn add(&mut self, content: &str) -> Result<Todo, AddTodoError> {
        if content.trim().is_empty() {
            debug!("event=todo_add module=store status=rejected reason=empty_content");
            return Err(AddTodoError::EmptyContent);
        }

        let todo = Todo::new(self.ids.next_id(), content)?;
        let next = self.current.with_appended(todo.clone())?;
        self.commit(next);
        info!(
            "event=todo_add module=store status=ok todo_id={} count={}",
            todo.id(),
            self.current.len()
        );
        Ok(todo)
    }

    /// Flips the finished flag of `id`.
    ///
    /// Returns `false` and does nothing when `id` is unknown.
    pub fn toggle_finish(&mut self, id: TodoId) -> bool {
        let Some(next) = self.current.with_toggled(id) else {
            debug!("event=todo_toggle module=store status=noop reason=not_found todo_id={id}");
            return false;
        };
        let finished = next.get(id).is_some_and(Todo::is_finished);
        self.commit(next);
        info!("event=todo_toggle module=store status=ok todo_id={id} is_finished={finished}");
        true
    }

    /// Removes `id`.
    ///
    /// Returns `false` and does nothing when `id` is unknown.
    pub fn delete(&mut self, id: TodoId) -> bool {
        let Some(next) = self.current.without(id) else {
            debug!("event=todo_delete module=store status=noop reason=not_found todo_id={id}");
            return false;
        };
        self.commit(next);
        info!(
            "event=todo_delete module=store status=ok todo_id={} count={}",
            id,
            self.current.len()
        );
        true
    }

    /// Registers a listener called with every new snapshot after it is saved.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&Arc<TodoCollection>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Detaches a listener. Returns `false` when it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, next: TodoCollection) {
        self.current = Arc::new(next);
        self.persistence.save(&self.current);
        for (_, listener) in &mut self.listeners {
            listener(&self.current);
        }
    }
}

impl<S: KvStorage> Debug for TodoStore<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStore")
            .field("key", &self.persistence.key())
            .field("count", &self.current.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{AddTodoError, TodoStore};
    use crate::model::id::IdGenerator;
    use crate::model::todo::TodoId;
    use crate::storage::kv::MemoryKvStorage;
    use crate::storage::persistence::PersistenceAdapter;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store(storage: &MemoryKvStorage) -> TodoStore<&MemoryKvStorage> {
        TodoStore::open_with_ids(
            PersistenceAdapter::new(storage),
            IdGenerator::with_clock(|| 1_000),
        )
    }

    #[test]
    fn add_trims_and_persists() {
        let storage = MemoryKvStorage::new();
        let mut store = store(&storage);

        let todo = store.add("  buy milk  ").unwrap();
        assert_eq!(todo.content(), "buy milk");
        assert_eq!(todo.id(), TodoId::new(1_000));
        assert_eq!(storage.write_count(), 1);
        assert_eq!(
            storage.raw("todos").as_deref(),
            Some(r#"[{"id":1000,"content":"buy milk","isFinish":false}]"#)
        );
    }

    #[test]
    fn blank_add_is_rejected_without_write() {
        let storage = MemoryKvStorage::new();
        let mut store = store(&storage);

        assert_eq!(store.add("").unwrap_err(), AddTodoError::EmptyContent);
        assert_eq!(store.add(" \n\t").unwrap_err(), AddTodoError::EmptyContent);
        assert!(store.snapshot().is_empty());
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn listeners_receive_each_new_snapshot_until_unsubscribed() {
        let storage = MemoryKvStorage::new();
        let mut store = store(&storage);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.len()));

        let todo = store.add("a").unwrap();
        store.add("b").unwrap();
        store.toggle_finish(TodoId::new(-1));
        store.delete(todo.id());
        assert!(store.unsubscribe(subscription));
        assert!(!store.unsubscribe(subscription));
        store.add("c").unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn old_snapshots_are_not_affected_by_later_mutations() {
        let storage = MemoryKvStorage::new();
        let mut store = store(&storage);
        let todo = store.add("a").unwrap();
        let before = store.snapshot();

        store.toggle_finish(todo.id());

        assert!(!before.get(todo.id()).unwrap().is_finished());
        assert!(store.snapshot().get(todo.id()).unwrap().is_finished());
    }
}
