//! Node identity and arena records.

use std::fmt;

use generational_arena::Index;
use uuid::Uuid;

/// Content of the root node created by `create_tree`.
pub const ROOT_CONTENT: &str = "Root";

/// Placeholder content for nodes created via `add_child`.
pub const PLACEHOLDER_CONTENT: &str = "New Node";

/// Stable node identity: assigned at creation, immutable, never reused.
///
/// UUID v4 gives practical uniqueness within a session. Ids survive every
/// structural operation, while a node's *position* is always re-derived as a
/// [`NodePath`](crate::domain::NodePath).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    /// Short hex prefix for listings and interactive addressing.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }

    /// Whether the full lowercase hex form starts with `prefix`.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.0.simple().to_string().starts_with(prefix)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Text payload and presentation state of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub id: NodeId,
    pub content: String,
    /// Hides children from layout and rendering; never affects structure.
    pub collapsed: bool,
}

impl NodeData {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: NodeId::fresh(),
            content: content.into(),
            collapsed: false,
        }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}

/// Tree node in the arena-based hierarchy structure.
///
/// Records are immutable once inserted: a structural edit inserts fresh
/// records for the root-to-edit-site spine and shares everything else by
/// index, which is what keeps old snapshots valid.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Payload for this node
    pub data: NodeData,
    /// Indices of child nodes in the arena, in sibling order
    pub children: Vec<Index>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_fresh_ids_when_compared_then_distinct() {
        assert_ne!(NodeId::fresh(), NodeId::fresh());
    }

    #[test]
    fn given_id_when_shortened_then_prefix_of_full_form() {
        let id = NodeId::fresh();
        assert_eq!(id.short().len(), 8);
        assert!(id.matches_prefix(&id.short()));
    }
}
