//! Domain layer: the tree-editing engine
//!
//! Independent of presentation concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod node;
pub mod ops;
pub mod path;

pub use arena::{PostOrderIterator, Snapshot, TreeArena, TreeIterator};
pub use error::DomainError;
pub use node::{NodeData, NodeId, TreeNode, PLACEHOLDER_CONTENT, ROOT_CONTENT};
pub use ops::SiblingInsert;
pub use path::{NodePath, Rewrite};
