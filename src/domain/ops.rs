//! Structural operations: pure snapshot-to-snapshot edits.
//!
//! Every operation is total. A missing id, a stale path, or a semantically
//! invalid target (deleting the root, indenting a first sibling, outdenting
//! above depth 2) returns the input snapshot unchanged, so the presentation
//! layer never faults on a path computed before a prior edit landed.

use tracing::instrument;

use crate::domain::arena::{Snapshot, TreeArena};
use crate::domain::node::{NodeData, NodeId, PLACEHOLDER_CONTENT};
use crate::domain::path::{NodePath, Rewrite};

/// Result of [`TreeArena::add_sibling`]: the new snapshot plus the created
/// node's id so the caller can route input focus to it. `new_id` is `None`
/// when the operation degraded to a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingInsert {
    pub snapshot: Snapshot,
    pub new_id: Option<NodeId>,
}

impl TreeArena {
    /// Appends a fresh node (placeholder content, no children) to the
    /// children of `parent_id`. Unknown parent: no-op.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, snapshot: Snapshot, parent_id: NodeId) -> Snapshot {
        let Some(path) = self.path_of(snapshot, parent_id) else {
            return snapshot;
        };
        self.rewrite_path(snapshot, &path, |store, idx| {
            let Some(node) = store.get_node(idx) else {
                return Rewrite::Keep(idx);
            };
            let (data, mut children) = (node.data.clone(), node.children.clone());
            let child = store.insert_node(NodeData::new(PLACEHOLDER_CONTENT), Vec::new());
            children.push(child);
            Rewrite::Keep(store.insert_node(data, children))
        })
    }

    /// Removes the node and its entire subtree. The root is never deleted;
    /// unknown ids are no-ops.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_node(&mut self, snapshot: Snapshot, id: NodeId) -> Snapshot {
        let Some(path) = self.path_of(snapshot, id) else {
            return snapshot;
        };
        if path.is_root() {
            return snapshot;
        }
        self.rewrite_path(snapshot, &path, |_, _| Rewrite::Remove)
    }

    /// Replaces the content of `id`. Unknown id or unchanged text: no-op.
    #[instrument(level = "debug", skip(self, text))]
    pub fn update_content(&mut self, snapshot: Snapshot, id: NodeId, text: &str) -> Snapshot {
        let Some(path) = self.path_of(snapshot, id) else {
            return snapshot;
        };
        self.rewrite_path(snapshot, &path, |store, idx| {
            let Some(node) = store.get_node(idx) else {
                return Rewrite::Keep(idx);
            };
            if node.data.content == text {
                return Rewrite::Keep(idx);
            }
            let (mut data, children) = (node.data.clone(), node.children.clone());
            data.content = text.to_string();
            Rewrite::Keep(store.insert_node(data, children))
        })
    }

    /// Flips the collapse flag of `id`. Collapse is meaningless on a leaf;
    /// leaves and unknown ids are no-ops.
    #[instrument(level = "debug", skip(self))]
    pub fn toggle_collapse(&mut self, snapshot: Snapshot, id: NodeId) -> Snapshot {
        let Some(path) = self.path_of(snapshot, id) else {
            return snapshot;
        };
        self.rewrite_path(snapshot, &path, |store, idx| {
            let Some(node) = store.get_node(idx) else {
                return Rewrite::Keep(idx);
            };
            if node.children.is_empty() {
                return Rewrite::Keep(idx);
            }
            let (mut data, children) = (node.data.clone(), node.children.clone());
            data.collapsed = !data.collapsed;
            Rewrite::Keep(store.insert_node(data, children))
        })
    }

    /// Inserts a fresh node with empty content immediately after the node
    /// at `path`, under the same parent, and returns its id for the focus
    /// request. The root has no parent to insert into; root and stale paths
    /// are no-ops with `new_id: None`.
    #[instrument(level = "debug", skip(self))]
    pub fn add_sibling(&mut self, snapshot: Snapshot, path: &NodePath) -> SiblingInsert {
        let (Some(parent_path), Some(at)) = (path.parent(), path.sibling_index()) else {
            return SiblingInsert {
                snapshot,
                new_id: None,
            };
        };
        let mut new_id = None;
        let snapshot = self.rewrite_path(snapshot, &parent_path, |store, idx| {
            let Some(node) = store.get_node(idx) else {
                return Rewrite::Keep(idx);
            };
            if at >= node.children.len() {
                return Rewrite::Keep(idx);
            }
            let (data, mut children) = (node.data.clone(), node.children.clone());
            let sibling = NodeData::new("");
            new_id = Some(sibling.id);
            let inserted = store.insert_node(sibling, Vec::new());
            children.insert(at + 1, inserted);
            Rewrite::Keep(store.insert_node(data, children))
        });
        SiblingInsert { snapshot, new_id }
    }

    /// Moves the node at `path` to become the last child of its immediately
    /// preceding sibling, keeping its own children. First siblings and the
    /// root have no preceding sibling: no-op.
    #[instrument(level = "debug", skip(self))]
    pub fn indent(&mut self, snapshot: Snapshot, path: &NodePath) -> Snapshot {
        let (Some(parent_path), Some(at)) = (path.parent(), path.sibling_index()) else {
            return snapshot;
        };
        if at == 0 {
            return snapshot;
        }
        self.rewrite_path(snapshot, &parent_path, |store, idx| {
            let Some(node) = store.get_node(idx) else {
                return Rewrite::Keep(idx);
            };
            if at >= node.children.len() {
                return Rewrite::Keep(idx);
            }
            let (data, mut children) = (node.data.clone(), node.children.clone());
            let Some(prev) = store.get_node(children[at - 1]) else {
                return Rewrite::Keep(idx);
            };
            let (prev_data, mut prev_children) = (prev.data.clone(), prev.children.clone());
            let moved = children.remove(at);
            prev_children.push(moved);
            children[at - 1] = store.insert_node(prev_data, prev_children);
            Rewrite::Keep(store.insert_node(data, children))
        })
    }

    /// Promotes the node at `path` to be the sibling immediately after its
    /// old parent under the grandparent. Every sibling that followed the
    /// node under the old parent is re-parented onto the promoted node, in
    /// original order ahead of its existing children, so no sibling is
    /// lost. Paths of depth < 2 lack a parent and grandparent: no-op.
    #[instrument(level = "debug", skip(self))]
    pub fn outdent(&mut self, snapshot: Snapshot, path: &NodePath) -> Snapshot {
        if path.depth() < 2 {
            return snapshot;
        }
        let (Some(parent_path), Some(at)) = (path.parent(), path.sibling_index()) else {
            return snapshot;
        };
        let (Some(grand_path), Some(parent_at)) =
            (parent_path.parent(), parent_path.sibling_index())
        else {
            return snapshot;
        };
        self.rewrite_path(snapshot, &grand_path, |store, idx| {
            let Some(grand) = store.get_node(idx) else {
                return Rewrite::Keep(idx);
            };
            let (grand_data, mut grand_children) = (grand.data.clone(), grand.children.clone());
            if parent_at >= grand_children.len() {
                return Rewrite::Keep(idx);
            }
            let Some(parent) = store.get_node(grand_children[parent_at]) else {
                return Rewrite::Keep(idx);
            };
            let (parent_data, parent_children) = (parent.data.clone(), parent.children.clone());
            if at >= parent_children.len() {
                return Rewrite::Keep(idx);
            }
            let Some(promoted) = store.get_node(parent_children[at]) else {
                return Rewrite::Keep(idx);
            };
            let promoted_data = promoted.data.clone();

            // Trailing siblings come first, then the node's own children.
            let mut promoted_children = parent_children[at + 1..].to_vec();
            promoted_children.extend_from_slice(&promoted.children);

            let new_promoted = store.insert_node(promoted_data, promoted_children);
            let new_parent = store.insert_node(parent_data, parent_children[..at].to_vec());
            grand_children[parent_at] = new_parent;
            grand_children.insert(parent_at + 1, new_promoted);
            Rewrite::Keep(store.insert_node(grand_data, grand_children))
        })
    }
}
