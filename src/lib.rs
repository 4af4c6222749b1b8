//! rsmind: interactive outline / mind-map editing core.
//!
//! A rooted tree of text nodes, edited through pure snapshot-to-snapshot
//! operations and rendered two ways: as an indented outline and as a 2-D
//! diagram layout.
//!
//! The engine never mutates a tree in place. [`TreeArena`] is an append-only
//! arena: every edit inserts fresh records for the root-to-edit-site spine
//! and shares the rest by index, so a previously issued [`Snapshot`] keeps
//! naming exactly the tree it named before. Invalid or stale targets degrade
//! to no-ops, which lets a view race against its own stale paths without
//! faulting.
//!
//! ```
//! use rsmind::{NodePath, TreeArena};
//!
//! let (mut store, snap) = TreeArena::create_tree();
//! let root_id = store.root_id(snap).unwrap();
//!
//! let snap = store.add_child(snap, root_id);
//! let insert = store.add_sibling(snap, &"0".parse::<NodePath>().unwrap());
//! assert!(insert.new_id.is_some());
//!
//! let snap = store.indent(insert.snapshot, &"1".parse::<NodePath>().unwrap());
//! assert_eq!(store.node_count(snap), 3);
//! assert_eq!(store.depth(snap), 3);
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod layout;
pub mod outline;
pub mod util;

pub use domain::{
    NodeData, NodeId, NodePath, Rewrite, SiblingInsert, Snapshot, TreeArena, TreeNode,
    PLACEHOLDER_CONTENT, ROOT_CONTENT,
};
pub use layout::{LayoutParams, PositionedNode};
pub use outline::{OutlineRow, TreeRender};
