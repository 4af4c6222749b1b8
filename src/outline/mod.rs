//! Outline (textual) view support: per-node rows and termtree rendering.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{NodeId, NodePath, Snapshot, TreeArena};

/// One visible outline line: everything the textual view needs to route a
/// gesture back into the tree store — the current path for the structural
/// key gestures, the id for content and collapse changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub id: NodeId,
    pub path: NodePath,
    pub depth: usize,
    pub content: String,
    pub collapsed: bool,
    pub has_children: bool,
}

impl TreeArena {
    /// Pre-order rows of every visible node. Descendants of collapsed nodes
    /// are skipped, matching what the outline renders.
    #[instrument(level = "debug", skip(self))]
    pub fn outline_rows(&self, snapshot: Snapshot) -> Vec<OutlineRow> {
        let mut rows = Vec::new();
        self.collect_rows(snapshot.root(), NodePath::root(), &mut rows);
        rows
    }

    fn collect_rows(&self, idx: Index, path: NodePath, rows: &mut Vec<OutlineRow>) {
        let Some(node) = self.get_node(idx) else {
            return;
        };
        rows.push(OutlineRow {
            id: node.data.id,
            depth: path.depth(),
            content: node.data.content.clone(),
            collapsed: node.data.collapsed,
            has_children: !node.children.is_empty(),
            path: path.clone(),
        });
        if node.data.collapsed {
            return;
        }
        for (i, &child) in node.children.iter().enumerate() {
            self.collect_rows(child, path.child(i), rows);
        }
    }
}

/// Conversion into a termtree for terminal display.
pub trait TreeRender {
    fn to_tree_string(&self, snapshot: Snapshot) -> Tree<String>;
}

impl TreeRender for TreeArena {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, snapshot: Snapshot) -> Tree<String> {
        fn label(store: &TreeArena, idx: Index) -> String {
            match store.get_node(idx) {
                Some(node) if node.data.collapsed && !node.children.is_empty() => {
                    format!("{} [+]", node.data.content)
                }
                Some(node) => node.data.content.clone(),
                None => String::new(),
            }
        }

        fn build_tree(store: &TreeArena, idx: Index, parent_tree: &mut Tree<String>) {
            let Some(node) = store.get_node(idx) else {
                return;
            };
            if node.data.collapsed {
                return;
            }
            for &child_idx in &node.children {
                let mut child_tree = Tree::new(label(store, child_idx));
                build_tree(store, child_idx, &mut child_tree);
                parent_tree.push(child_tree);
            }
        }

        let mut tree = Tree::new(label(self, snapshot.root()));
        build_tree(self, snapshot.root(), &mut tree);
        tree
    }
}
