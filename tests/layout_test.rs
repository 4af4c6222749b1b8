//! Layout engine tests: box geometry, centering, and collapse pruning

use rstest::{fixture, rstest};
use rsmind::util::testing::init_test_setup;
use rsmind::{LayoutParams, NodeId, PositionedNode, Snapshot, TreeArena};

const PARAMS: LayoutParams = LayoutParams {
    origin_x: 0.0,
    origin_y: 0.0,
    node_width: 100.0,
    node_height: 40.0,
    h_spacing: 60.0,
    v_spacing: 20.0,
};

#[fixture]
fn seeded() -> (TreeArena, Snapshot) {
    init_test_setup();
    TreeArena::create_tree()
}

fn node_id(store: &TreeArena, snap: Snapshot, path: &str) -> NodeId {
    let idx = store.resolve_path(snap, &path.parse().unwrap()).unwrap();
    store.get_node(idx).unwrap().data.id
}

fn add_children(store: &mut TreeArena, snap: Snapshot, parent_path: &str, n: usize) -> Snapshot {
    let parent = node_id(store, snap, parent_path);
    let mut snap = snap;
    for _ in 0..n {
        snap = store.add_child(snap, parent);
    }
    snap
}

// ============================================================
// Single Node
// ============================================================

#[rstest]
fn given_single_root_when_laid_out_then_box_at_origin(seeded: (TreeArena, Snapshot)) {
    let (store, snap) = seeded;
    let params = LayoutParams {
        origin_x: 15.0,
        origin_y: 25.0,
        ..PARAMS
    };

    let (root, total_height) = store.compute_layout(snap, &params).unwrap();
    assert_eq!(root.x, 15.0);
    assert_eq!(root.y, 25.0);
    assert_eq!(root.width, 100.0);
    assert_eq!(root.height, 40.0);
    assert!(root.children.is_empty());
    assert_eq!(total_height, 40.0);
}

// ============================================================
// Two Leaves
// ============================================================

#[rstest]
fn given_two_leaf_children_when_laid_out_then_spacing_and_centering_exact(
    seeded: (TreeArena, Snapshot),
) {
    let (mut store, snap) = seeded;
    let snap = add_children(&mut store, snap, "/", 2);

    let (root, total_height) = store.compute_layout(snap, &PARAMS).unwrap();
    let [first, second] = root.children.as_slice() else {
        panic!("expected two positioned children");
    };

    // y advances by node height plus the vertical gap.
    assert_eq!(first.y, 0.0);
    assert_eq!(second.y - first.y, PARAMS.node_height + PARAMS.v_spacing);

    // x is a pure function of depth.
    assert_eq!(first.x, second.x);
    assert_eq!(first.x - root.x, PARAMS.h_spacing);

    // The root centers against its children's span.
    let span = 2.0 * PARAMS.node_height + PARAMS.v_spacing;
    assert_eq!(total_height, span);
    assert_eq!(root.y, (span - PARAMS.node_height) / 2.0);
    assert_eq!(root.y, (first.y + second.y) / 2.0);
}

// ============================================================
// Depth and Total Height
// ============================================================

#[rstest]
fn given_grandchildren_when_laid_out_then_x_advances_per_level(seeded: (TreeArena, Snapshot)) {
    let (mut store, snap) = seeded;
    let snap = add_children(&mut store, snap, "/", 1);
    let snap = add_children(&mut store, snap, "0", 1);

    let (root, _) = store.compute_layout(snap, &PARAMS).unwrap();
    let child = &root.children[0];
    let grandchild = &child.children[0];
    assert_eq!(child.x, PARAMS.h_spacing);
    assert_eq!(grandchild.x, 2.0 * PARAMS.h_spacing);
}

#[rstest]
fn given_three_leaves_when_laid_out_then_total_height_sums_gaps(seeded: (TreeArena, Snapshot)) {
    let (mut store, snap) = seeded;
    let snap = add_children(&mut store, snap, "/", 3);

    let (root, total_height) = store.compute_layout(snap, &PARAMS).unwrap();
    assert_eq!(
        total_height,
        3.0 * PARAMS.node_height + 2.0 * PARAMS.v_spacing
    );
    assert_eq!(root.children[2].y, 2.0 * (PARAMS.node_height + PARAMS.v_spacing));
}

// ============================================================
// Collapse Pruning
// ============================================================

fn find<'a>(node: &'a PositionedNode, content_id: NodeId) -> Option<&'a PositionedNode> {
    if node.id == content_id {
        return Some(node);
    }
    node.children.iter().find_map(|child| find(child, content_id))
}

#[rstest]
fn given_collapsed_branch_when_laid_out_then_descendants_absent(seeded: (TreeArena, Snapshot)) {
    let (mut store, snap) = seeded;
    // Root with two children; the first child carries three grandchildren.
    let snap = add_children(&mut store, snap, "/", 2);
    let snap = add_children(&mut store, snap, "0", 3);
    let first = node_id(&store, snap, "0");
    let second = node_id(&store, snap, "1");
    let grandchild = node_id(&store, snap, "0.0");

    let folded = store.toggle_collapse(snap, first);
    let (root, total_height) = store.compute_layout(folded, &PARAMS).unwrap();

    let first_pos = find(&root, first).unwrap();
    assert!(first_pos.collapsed);
    assert!(first_pos.children.is_empty());
    assert!(find(&root, grandchild).is_none());

    // A collapsed branch contributes exactly one box height: the sibling
    // below sits as if the branch were a leaf.
    let second_pos = find(&root, second).unwrap();
    assert_eq!(first_pos.y, 0.0);
    assert_eq!(second_pos.y, PARAMS.node_height + PARAMS.v_spacing);
    assert_eq!(total_height, 2.0 * PARAMS.node_height + PARAMS.v_spacing);
}

#[rstest]
fn given_expanded_branch_when_laid_out_then_hidden_height_returns(seeded: (TreeArena, Snapshot)) {
    let (mut store, snap) = seeded;
    let snap = add_children(&mut store, snap, "/", 2);
    let snap = add_children(&mut store, snap, "0", 3);
    let first = node_id(&store, snap, "0");

    let folded = store.toggle_collapse(snap, first);
    let (_, folded_height) = store.compute_layout(folded, &PARAMS).unwrap();
    let unfolded = store.toggle_collapse(folded, first);
    let (_, unfolded_height) = store.compute_layout(unfolded, &PARAMS).unwrap();

    assert!(unfolded_height > folded_height);
    // Three grandchildren stacked plus the second top-level child.
    assert_eq!(
        unfolded_height,
        4.0 * PARAMS.node_height + 3.0 * PARAMS.v_spacing
    );
}
