//! Arena store tests: traversal order, depth, and snapshot bookkeeping

use rstest::{fixture, rstest};
use rsmind::util::testing::init_test_setup;
use rsmind::{Snapshot, TreeArena};

#[fixture]
fn seeded() -> (TreeArena, Snapshot) {
    init_test_setup();
    TreeArena::create_tree()
}

/// Root with children [c0, c1]; c0 has one child.
fn branched(store: &mut TreeArena, snap: Snapshot) -> Snapshot {
    let root = store.root_id(snap).unwrap();
    let snap = store.add_child(snap, root);
    let snap = store.add_child(snap, root);
    let first_idx = store.resolve_path(snap, &"0".parse().unwrap()).unwrap();
    let first = store.get_node(first_idx).unwrap().data.id;
    store.add_child(snap, first)
}

#[rstest]
fn given_tree_when_iterating_then_visits_all_nodes(seeded: (TreeArena, Snapshot)) {
    let (mut store, snap) = seeded;
    let snap = branched(&mut store, snap);

    let mut count = 0;
    for (idx, node) in store.iter(snap) {
        count += 1;
        assert!(store.get_node(idx).is_some());
        assert!(!node.data.content.is_empty());
    }
    assert_eq!(count, 4);
    assert_eq!(store.node_count(snap), 4);
}

#[rstest]
fn given_tree_when_postorder_iterating_then_root_comes_last(seeded: (TreeArena, Snapshot)) {
    let (mut store, snap) = seeded;
    let snap = branched(&mut store, snap);
    let root = store.root_id(snap).unwrap();

    let order: Vec<_> = store
        .iter_postorder(snap)
        .map(|(_, node)| node.data.id)
        .collect();
    assert_eq!(order.len(), 4);
    assert_eq!(order.last(), Some(&root));

    // Children precede their parent.
    let first_idx = store.resolve_path(snap, &"0".parse().unwrap()).unwrap();
    let first = store.get_node(first_idx).unwrap().data.id;
    let grandchild_idx = store.resolve_path(snap, &"0.0".parse().unwrap()).unwrap();
    let grandchild = store.get_node(grandchild_idx).unwrap().data.id;
    let pos = |id| order.iter().position(|&x| x == id).unwrap();
    assert!(pos(grandchild) < pos(first));
}

#[rstest]
fn given_nested_tree_when_measuring_then_depth_counts_levels(seeded: (TreeArena, Snapshot)) {
    let (mut store, snap) = seeded;
    assert_eq!(store.depth(snap), 1);
    let snap = branched(&mut store, snap);
    assert_eq!(store.depth(snap), 3);
}

#[rstest]
fn given_several_snapshots_when_collecting_then_all_live_roots_survive(
    seeded: (TreeArena, Snapshot),
) {
    let (mut store, snap) = seeded;
    let old = branched(&mut store, snap);
    let root = store.root_id(old).unwrap();
    let new = store.add_child(old, root);

    store.collect_garbage(&[old, new]);

    // Both snapshots stay fully readable: shared subtrees plus each spine.
    assert_eq!(store.node_count(old), 4);
    assert_eq!(store.node_count(new), 5);
    assert!(store.allocated() >= 5);
}
