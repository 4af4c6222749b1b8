//! Path resolution tests: derived addressing against live and stale trees

use rstest::{fixture, rstest};
use rsmind::util::testing::init_test_setup;
use rsmind::{NodeId, NodePath, Snapshot, TreeArena};

#[fixture]
fn seeded() -> (TreeArena, Snapshot) {
    init_test_setup();
    TreeArena::create_tree()
}

/// Root with two children; the first child has one child of its own.
fn branched(store: &mut TreeArena, snap: Snapshot) -> Snapshot {
    let root = store.root_id(snap).unwrap();
    let snap = store.add_child(snap, root);
    let snap = store.add_child(snap, root);
    let first = node_id(store, snap, "0");
    store.add_child(snap, first)
}

fn node_id(store: &TreeArena, snap: Snapshot, path: &str) -> NodeId {
    let idx = store.resolve_path(snap, &path.parse().unwrap()).unwrap();
    store.get_node(idx).unwrap().data.id
}

// ============================================================
// Resolution
// ============================================================

#[rstest]
fn given_branched_tree_when_resolving_paths_then_each_node_found(seeded: (TreeArena, Snapshot)) {
    let (mut store, snap) = seeded;
    let snap = branched(&mut store, snap);

    for path in ["/", "0", "1", "0.0"] {
        assert!(
            store.resolve_path(snap, &path.parse().unwrap()).is_some(),
            "path {path} should resolve"
        );
    }
}

#[rstest]
fn given_out_of_range_index_when_resolving_then_none(seeded: (TreeArena, Snapshot)) {
    let (mut store, snap) = seeded;
    let snap = branched(&mut store, snap);

    assert!(store.resolve_path(snap, &"2".parse().unwrap()).is_none());
    assert!(store.resolve_path(snap, &"0.1".parse().unwrap()).is_none());
    assert!(store.resolve_path(snap, &"1.0".parse().unwrap()).is_none());
    assert!(store.resolve_path(snap, &"0.0.0.0".parse().unwrap()).is_none());
}

// ============================================================
// Id to Path
// ============================================================

#[rstest]
fn given_node_ids_when_deriving_paths_then_pre_order_positions_returned(
    seeded: (TreeArena, Snapshot),
) {
    let (mut store, snap) = seeded;
    let snap = branched(&mut store, snap);

    let root = store.root_id(snap).unwrap();
    assert_eq!(store.path_of(snap, root), Some(NodePath::root()));

    let grandchild = node_id(&store, snap, "0.0");
    assert_eq!(
        store.path_of(snap, grandchild),
        Some(NodePath::new(vec![0, 0]))
    );

    assert_eq!(store.path_of(snap, NodeId::fresh()), None);
}

// ============================================================
// Paths Shift After Edits
// ============================================================

#[rstest]
fn given_deletion_when_resolving_old_path_then_shifted_sibling_found(
    seeded: (TreeArena, Snapshot),
) {
    let (mut store, snap) = seeded;
    let snap = branched(&mut store, snap);
    let first = node_id(&store, snap, "0");
    let second = node_id(&store, snap, "1");

    let after = store.delete_node(snap, first);

    // The stale path "0" now names what used to be the second child: paths
    // are positional and recomputed, never stable identifiers.
    assert_eq!(node_id(&store, after, "0"), second);
    assert!(store.resolve_path(after, &"1".parse().unwrap()).is_none());

    // Ids keep working across the same edit.
    assert_eq!(store.path_of(after, second), Some(NodePath::new(vec![0])));
    assert_eq!(store.path_of(after, first), None);
}
