use donelist_core::{
    active_view, completed_view, decode_todos, encode_todos, IdGenerator, MemoryKvStorage,
    PersistenceAdapter, TodoCollection, TodoId, TodoStore, COMPLETED_VIEW_LIMIT,
};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Toggle(usize),
    Delete(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => "[ a-z]{0,8}".prop_map(Op::Add),
        2 => (0usize..16).prop_map(Op::Toggle),
        1 => (0usize..16).prop_map(Op::Delete),
    ]
}

/// Runs `ops` against a store with a frozen clock; index operands pick an
/// existing todo by position, or a missing id when out of range.
fn run(ops: &[Op]) -> TodoCollection {
    let storage = MemoryKvStorage::new();
    let mut store = TodoStore::open_with_ids(
        PersistenceAdapter::new(&storage),
        IdGenerator::with_clock(|| 1_000),
    );
    for op in ops {
        match op {
            Op::Add(text) => {
                let _ = store.add(text);
            }
            Op::Toggle(index) => {
                store.toggle_finish(pick(&store.snapshot(), *index));
            }
            Op::Delete(index) => {
                store.delete(pick(&store.snapshot(), *index));
            }
        }
    }
    (*store.snapshot()).clone()
}

fn pick(collection: &TodoCollection, index: usize) -> TodoId {
    collection
        .ids()
        .get(index)
        .copied()
        .unwrap_or(TodoId::new(-1))
}

proptest! {
    #[test]
    fn adds_count_only_non_blank_inputs(inputs in prop::collection::vec("[ a-z]{0,6}", 0..24)) {
        let ops = inputs.iter().cloned().map(Op::Add).collect::<Vec<_>>();
        let collection = run(&ops);

        let expected = inputs.iter().filter(|text| !text.trim().is_empty()).count();
        prop_assert_eq!(collection.len(), expected);
        let unique = collection.ids().into_iter().collect::<HashSet<_>>();
        prop_assert_eq!(unique.len(), expected);
    }

    #[test]
    fn views_partition_the_collection(ops in prop::collection::vec(op_strategy(), 0..48)) {
        let collection = run(&ops);

        let active = active_view(&collection);
        let finished = collection.iter().filter(|todo| todo.is_finished()).count();
        prop_assert_eq!(active.len() + finished, collection.len());
        prop_assert!(active.iter().all(|todo| !todo.is_finished()));

        let completed = completed_view(&collection);
        prop_assert_eq!(completed.len(), finished.min(COMPLETED_VIEW_LIMIT));
        prop_assert!(completed.windows(2).all(|pair| pair[0].id() > pair[1].id()));
        let active_ids = active.iter().map(|todo| todo.id()).collect::<HashSet<_>>();
        prop_assert!(completed.iter().all(|todo| !active_ids.contains(&todo.id())));
        if let Some(oldest_shown) = completed.last() {
            let hidden_newer = collection
                .iter()
                .filter(|todo| todo.is_finished() && todo.id() > oldest_shown.id())
                .count();
            prop_assert_eq!(hidden_newer, completed.len() - 1);
        }
    }

    #[test]
    fn encoded_collections_round_trip(ops in prop::collection::vec(op_strategy(), 0..32)) {
        let collection = run(&ops);
        let payload = encode_todos(&collection).unwrap();
        prop_assert_eq!(decode_todos(&payload).unwrap(), collection);
    }
}
