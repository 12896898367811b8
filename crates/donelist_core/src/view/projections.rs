//! Active/completed/count projections over a todo snapshot.

use crate::model::collection::TodoCollection;
use crate::model::todo::Todo;

/// Maximum number of todos shown by `completed_view`.
pub const COMPLETED_VIEW_LIMIT: usize = 5;

/// Placeholder for an empty active view.
pub const ACTIVE_EMPTY_HINT: &str = "Nothing to do. Add a todo below.";

/// Placeholder for an empty completed view.
pub const COMPLETED_EMPTY_HINT: &str = "Completed todos will show here.";

/// Unfinished todos in insertion order.
pub fn active_view(collection: &TodoCollection) -> Vec<&Todo> {
    collection.iter().filter(|todo| !todo.is_finished()).collect()
}

/// Finished todos, newest id first, capped at `COMPLETED_VIEW_LIMIT`.
pub fn completed_view(collection: &TodoCollection) -> Vec<&Todo> {
    let mut finished = collection
        .iter()
        .filter(|todo| todo.is_finished())
        .collect::<Vec<_>>();
    finished.sort_unstable_by(|left, right| right.id().cmp(&left.id()));
    finished.truncate(COMPLETED_VIEW_LIMIT);
    finished
}

/// Number of unfinished todos.
pub fn count_view(collection: &TodoCollection) -> usize {
    collection.iter().filter(|todo| !todo.is_finished()).count()
}

/// Number of todos in any state, shown in the list header.
pub fn total_count(collection: &TodoCollection) -> usize {
    collection.len()
}

/// All projections of one snapshot, computed together for a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoViews<'a> {
    pub active: Vec<&'a Todo>,
    pub completed: Vec<&'a Todo>,
    pub active_count: usize,
    pub total_count: usize,
}

impl<'a> TodoViews<'a> {
    pub fn of(collection: &'a TodoCollection) -> Self {
        Self {
            active: active_view(collection),
            completed: completed_view(collection),
            active_count: count_view(collection),
            total_count: total_count(collection),
        }
    }

    /// When true, render `ACTIVE_EMPTY_HINT` instead of an empty list.
    pub fn active_is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// When true, render `COMPLETED_EMPTY_HINT` instead of an empty list.
    pub fn completed_is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{active_view, completed_view, count_view, TodoViews, COMPLETED_VIEW_LIMIT};
    use crate::model::collection::TodoCollection;
    use crate::model::todo::{Todo, TodoId};

    fn collection(shape: &[(i64, bool)]) -> TodoCollection {
        let items = shape
            .iter()
            .map(|&(id, finished)| {
                let todo = Todo::new(TodoId::new(id), format!("todo {id}")).unwrap();
                if finished {
                    todo.toggled()
                } else {
                    todo
                }
            })
            .collect();
        TodoCollection::try_from_vec(items).unwrap()
    }

    fn ids(todos: &[&Todo]) -> Vec<i64> {
        todos.iter().map(|todo| todo.id().get()).collect()
    }

    #[test]
    fn active_view_keeps_insertion_order_even_when_ids_are_not_sorted() {
        let todos = collection(&[(30, false), (10, true), (20, false)]);
        assert_eq!(ids(&active_view(&todos)), vec![30, 20]);
    }

    #[test]
    fn completed_view_sorts_by_id_descending_and_truncates() {
        let todos = collection(&[
            (1, true),
            (7, true),
            (3, true),
            (2, false),
            (6, true),
            (4, true),
            (5, true),
        ]);
        let completed = completed_view(&todos);
        assert_eq!(completed.len(), COMPLETED_VIEW_LIMIT);
        assert_eq!(ids(&completed), vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn count_view_counts_only_active() {
        let todos = collection(&[(1, true), (2, false), (3, false)]);
        assert_eq!(count_view(&todos), 2);
    }

    #[test]
    fn empty_collection_signals_both_empty_states() {
        let todos = TodoCollection::new();
        let views = TodoViews::of(&todos);
        assert!(views.active_is_empty());
        assert!(views.completed_is_empty());
        assert_eq!(views.active_count, 0);
        assert_eq!(views.total_count, 0);
    }
}
