//! Arena-backed tree store with persistent snapshots.

use std::collections::HashSet;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::node::{NodeData, NodeId, TreeNode, ROOT_CONTENT};

/// Handle naming one tree instant: the root record of that snapshot.
///
/// Snapshots are cheap copies. Structural operations take a snapshot and
/// return a new one; the input snapshot keeps resolving to the exact tree it
/// named before the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Snapshot {
    root: Index,
}

impl Snapshot {
    pub(crate) fn new(root: Index) -> Self {
        Self { root }
    }

    pub(crate) fn root(&self) -> Index {
        self.root
    }
}

/// Arena-based tree store for the outline hierarchy.
///
/// Uses a generational arena for memory-safe node references and O(1)
/// lookups. The arena is append-only under edits: records are never mutated
/// in place, so unchanged subtrees are shared between snapshots and every
/// previously issued [`Snapshot`] stays valid until it is collected away by
/// [`collect_garbage`](Self::collect_garbage).
#[derive(Debug, Default)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
}

impl TreeArena {
    /// Creates a store seeded with a single root node and returns the
    /// initial snapshot. The root has content "Root" and no children.
    pub fn create_tree() -> (Self, Snapshot) {
        let mut store = Self {
            arena: Arena::new(),
        };
        let root = store.insert_node(NodeData::new(ROOT_CONTENT), Vec::new());
        (store, Snapshot::new(root))
    }

    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_node(&mut self, data: NodeData, children: Vec<Index>) -> Index {
        self.arena.insert(TreeNode { data, children })
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    /// Id of the snapshot's root node.
    pub fn root_id(&self, snapshot: Snapshot) -> Option<NodeId> {
        self.get_node(snapshot.root()).map(|node| node.data.id)
    }

    /// Number of records currently allocated, reachable or not.
    pub fn allocated(&self) -> usize {
        self.arena.len()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self, snapshot: Snapshot) -> TreeIterator<'_> {
        TreeIterator::new(self, snapshot)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self, snapshot: Snapshot) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, snapshot)
    }

    /// Nodes reachable from `snapshot`, collapsed branches included.
    #[instrument(level = "debug", skip(self))]
    pub fn node_count(&self, snapshot: Snapshot) -> usize {
        self.iter(snapshot).count()
    }

    /// Whether `id` names a node reachable from `snapshot`.
    #[instrument(level = "trace", skip(self))]
    pub fn contains(&self, snapshot: Snapshot, id: NodeId) -> bool {
        self.iter(snapshot).any(|(_, node)| node.data.id == id)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, snapshot: Snapshot) -> usize {
        self.calculate_depth(snapshot.root())
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Drops every record unreachable from the given live snapshots.
    ///
    /// Snapshots not in `live` become invalid afterwards; operations handed
    /// a collected snapshot degrade to no-ops like any other stale target.
    #[instrument(level = "debug", skip(self))]
    pub fn collect_garbage(&mut self, live: &[Snapshot]) {
        let mut reachable: HashSet<Index> = HashSet::new();
        let mut stack: Vec<Index> = live.iter().map(|snapshot| snapshot.root()).collect();
        while let Some(idx) = stack.pop() {
            if !reachable.insert(idx) {
                continue;
            }
            if let Some(node) = self.arena.get(idx) {
                stack.extend(node.children.iter().copied());
            }
        }
        self.arena.retain(|idx, _| reachable.contains(&idx));
    }
}

pub struct TreeIterator<'a> {
    store: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(store: &'a TreeArena, snapshot: Snapshot) -> Self {
        Self {
            store,
            stack: vec![snapshot.root()],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.store.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    store: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(store: &'a TreeArena, snapshot: Snapshot) -> Self {
        Self {
            store,
            stack: vec![(snapshot.root(), false)],
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.store.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
