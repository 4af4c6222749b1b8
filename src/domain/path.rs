//! Path addressing and the shared rewrite algorithm.
//!
//! A path is the full description of a node's position: zero-based child
//! indices from the root, recomputed on every operation because indices
//! shift after inserts and deletes. All structural edits funnel through one
//! recursive rewrite that walks a path down and splices a tagged result back
//! up, sharing every untouched subtree.

use std::fmt;
use std::str::FromStr;

use generational_arena::Index;
use itertools::Itertools;
use tracing::instrument;

use crate::domain::arena::{Snapshot, TreeArena};
use crate::domain::error::DomainError;
use crate::domain::node::NodeId;

/// Root-relative position of a node. The root's path is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of levels below the root.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Path of the parent node, `None` at the root.
    pub fn parent(&self) -> Option<NodePath> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Index of this node among its siblings, `None` at the root.
    pub fn sibling_index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Path of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> NodePath {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "{}", self.0.iter().join("."))
        }
    }
}

impl FromStr for NodePath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "/" {
            return Ok(Self::root());
        }
        let indices = s
            .split('.')
            .map(|part| {
                part.parse::<usize>().map_err(|_| DomainError::InvalidPath {
                    input: s.to_string(),
                    reason: format!("'{part}' is not a child index"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(indices))
    }
}

/// Outcome of a rewrite updater: splice a replacement record into the
/// parent's child list, or remove the slot entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    Keep(Index),
    Remove,
}

impl TreeArena {
    /// Resolves `path` against `snapshot`. An out-of-range index at any
    /// step resolves to `None`.
    #[instrument(level = "trace", skip(self))]
    pub fn resolve_path(&self, snapshot: Snapshot, path: &NodePath) -> Option<Index> {
        let mut current = snapshot.root();
        for &step in path.indices() {
            current = *self.get_node(current)?.children.get(step)?;
        }
        self.get_node(current)?;
        Some(current)
    }

    /// Derives the current path of `id` under `snapshot` (pre-order walk).
    #[instrument(level = "trace", skip(self))]
    pub fn path_of(&self, snapshot: Snapshot, id: NodeId) -> Option<NodePath> {
        fn walk(store: &TreeArena, idx: Index, id: NodeId, acc: &mut Vec<usize>) -> bool {
            let Some(node) = store.get_node(idx) else {
                return false;
            };
            if node.data.id == id {
                return true;
            }
            for (i, &child) in node.children.iter().enumerate() {
                acc.push(i);
                if walk(store, child, id, acc) {
                    return true;
                }
                acc.pop();
            }
            false
        }

        let mut acc = Vec::new();
        walk(self, snapshot.root(), id, &mut acc).then(|| NodePath::new(acc))
    }

    /// Applies `updater` to the node at `path` and splices the tagged
    /// result back into a freshly built spine. Subtrees off the spine are
    /// shared by index, never copied.
    ///
    /// Total: a stale snapshot, an out-of-range index, or an updater that
    /// asks to remove the root all degrade to returning `snapshot`
    /// unchanged.
    pub fn rewrite_path<F>(&mut self, snapshot: Snapshot, path: &NodePath, mut updater: F) -> Snapshot
    where
        F: FnMut(&mut TreeArena, Index) -> Rewrite,
    {
        match self.rewrite_at(snapshot.root(), path.indices(), &mut updater) {
            Some(root) if root == snapshot.root() => snapshot,
            Some(root) => Snapshot::new(root),
            None => snapshot,
        }
    }

    fn rewrite_at(
        &mut self,
        node: Index,
        steps: &[usize],
        updater: &mut dyn FnMut(&mut TreeArena, Index) -> Rewrite,
    ) -> Option<Index> {
        let Some((&step, rest)) = steps.split_first() else {
            return match updater(self, node) {
                Rewrite::Keep(replacement) => Some(replacement),
                Rewrite::Remove => None,
            };
        };

        let (data, children) = match self.get_node(node) {
            Some(n) => (n.data.clone(), n.children.clone()),
            None => return Some(node),
        };
        let Some(&child) = children.get(step) else {
            // Target not found below this branch; leave it shared.
            return Some(node);
        };

        let mut children = children;
        match self.rewrite_at(child, rest, updater) {
            Some(new_child) if new_child == child => return Some(node),
            Some(new_child) => children[step] = new_child,
            None => {
                children.remove(step);
            }
        }
        Some(self.insert_node(data, children))
    }
}
