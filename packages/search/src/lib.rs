//! vsstree-search: Path-Pattern Queries over VSS Trees
//!
//! The matcher walks a [`Tree`](vsstree_tree::Tree) against a dotted
//! search pattern (`Vehicle.Cabin.*`), honoring wildcard segments,
//! depth limits and exclusion scopes, and returns matched nodes with
//! their reconstructed paths plus an aggregated validation level.
//!
//! The front-end functions layer fixed query configurations on top:
//! leaf listings, UUID listings, subtree metadata and JSON export.
//!
//! # Example
//!
//! ```rust
//! use vsstree_search::{search, SearchOptions};
//! use vsstree_tree::{NodeKind, NodeRecord, Tree};
//!
//! let mut tree = Tree::with_root(NodeRecord::new("Vehicle", NodeKind::Branch));
//! let root = tree.root();
//! tree.add_child(root, NodeRecord::new("Speed", NodeKind::Sensor));
//!
//! let result = search(&tree, root, "Vehicle.*", &SearchOptions::default());
//! assert_eq!(result.matches[0].path, "Vehicle.Speed");
//! ```

mod error;
mod export;
mod lists;
mod matcher;
mod metadata;

pub use error::SearchError;
pub use export::{to_json, write_json};
pub use lists::{leaf_paths, uuid_pairs, write_leaf_list, write_uuid_list};
pub use matcher::{search, Match, SearchOptions, SearchResult};
pub use metadata::{subtree_metadata, NodeMetadata};
