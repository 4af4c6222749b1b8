//! Diagram layout: converts a tree snapshot into absolute node positions.
//!
//! Post-order, single pass. x is purely a function of depth; y is a function
//! of position among rendered siblings and the cumulative heights of earlier
//! subtrees. Collapsed branches contribute one node box and are otherwise
//! never traversed.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::{NodeId, Snapshot, TreeArena};

/// Fixed node box size and spacing for the diagram view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub origin_x: f64,
    pub origin_y: f64,
    pub node_width: f64,
    pub node_height: f64,
    /// Horizontal advance per depth level
    pub h_spacing: f64,
    /// Vertical gap between sibling subtrees
    pub v_spacing: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            node_width: 160.0,
            node_height: 40.0,
            h_spacing: 60.0,
            v_spacing: 20.0,
        }
    }
}

/// A visible node with absolute position and size, plus its positioned
/// children. Collapsed nodes appear themselves; their descendants do not.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub id: NodeId,
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub collapsed: bool,
    pub children: Vec<PositionedNode>,
}

impl PositionedNode {
    /// Box midpoint, the anchor for connector lines.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

impl TreeArena {
    /// Lays out every visible node of `snapshot`: children first, left to
    /// right in stored order. Each child advances x by `h_spacing` and y by
    /// the preceding siblings' subtree heights plus `v_spacing`; a parent
    /// centers its own box against the vertical span of its children.
    ///
    /// Returns the positioned root and the total height of the laid-out
    /// tree. `None` only when `snapshot` does not resolve in this store.
    #[instrument(level = "debug", skip(self, params))]
    pub fn compute_layout(
        &self,
        snapshot: Snapshot,
        params: &LayoutParams,
    ) -> Option<(PositionedNode, f64)> {
        self.layout_node(snapshot.root(), params.origin_x, params.origin_y, params)
    }

    fn layout_node(
        &self,
        idx: Index,
        x: f64,
        y_offset: f64,
        params: &LayoutParams,
    ) -> Option<(PositionedNode, f64)> {
        let node = self.get_node(idx)?;

        let mut positioned = PositionedNode {
            id: node.data.id,
            content: node.data.content.clone(),
            x,
            y: y_offset,
            width: params.node_width,
            height: params.node_height,
            collapsed: node.data.collapsed,
            children: Vec::new(),
        };

        if node.children.is_empty() || node.data.collapsed {
            return Some((positioned, params.node_height));
        }

        let child_x = x + params.h_spacing;
        let mut cursor = y_offset;
        for &child in &node.children {
            if let Some((child_pos, child_height)) =
                self.layout_node(child, child_x, cursor, params)
            {
                cursor += child_height + params.v_spacing;
                positioned.children.push(child_pos);
            }
        }
        if positioned.children.is_empty() {
            return Some((positioned, params.node_height));
        }

        let span = cursor - y_offset - params.v_spacing;
        positioned.y = y_offset + (span - params.node_height) / 2.0;
        Some((positioned, span))
    }
}
