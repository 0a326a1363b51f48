//! vsstree-tree: Arena-Owned VSS Tree Model
//!
//! This layer owns the recursive node graph and drives the codec in
//! tree order. A [`Tree`] holds every node in one arena; nodes refer
//! to each other through [`NodeHandle`] indices, so there are no
//! pointers to invalidate and the whole tree is torn down in one pass
//! when the `Tree` is dropped.
//!
//! The read side decodes pre-order: a node's fields, then its declared
//! number of children, each a fresh recursive decode with this node as
//! parent. The write side mirrors that order exactly - the format is
//! not self-delimiting, so read and write must agree byte for byte.
//!
//! # Example
//!
//! ```rust
//! use vsstree_codec::{NodeKind, NodeRecord};
//! use vsstree_tree::Tree;
//!
//! let mut tree = Tree::with_root(NodeRecord::new("Vehicle", NodeKind::Branch));
//! let root = tree.root();
//! tree.add_child(root, NodeRecord::new("Speed", NodeKind::Sensor));
//!
//! let bytes = tree.encode().unwrap();
//! let reloaded = Tree::decode(&bytes).unwrap();
//! assert_eq!(reloaded.len(), 2);
//! assert_eq!(reloaded.name(reloaded.root()), "Vehicle");
//! ```

mod error;
mod tree;

pub use error::TreeError;
pub use tree::{NodeHandle, Tree};

// The wire vocabulary is part of this layer's API surface.
pub use vsstree_codec::{NodeKind, NodeRecord, Validation};
