//! Leaf-path and UUID list extraction.
//!
//! Both lists come from the same traversal (`*`, any depth, leaves
//! only); they differ only in what is serialized per match. The file
//! formats reproduce the historical ones byte for byte, including the
//! unquoted-brace tuple form of the UUID list, because existing
//! consumers parse exactly that shape.

use std::io::Write;

use vsstree_tree::Tree;

use crate::error::SearchError;
use crate::matcher::{search, Match, SearchOptions};

fn leaf_matches(tree: &Tree) -> Vec<Match> {
    search(
        tree,
        tree.root(),
        "*",
        &SearchOptions {
            any_depth: true,
            leaf_only: true,
            ..SearchOptions::default()
        },
    )
    .matches
}

/// Dotted paths of every leaf node, in pre-order.
pub fn leaf_paths(tree: &Tree) -> Vec<String> {
    leaf_matches(tree).into_iter().map(|m| m.path).collect()
}

/// `(path, uuid)` of every leaf node, in pre-order.
pub fn uuid_pairs(tree: &Tree) -> Vec<(String, String)> {
    leaf_matches(tree)
        .into_iter()
        .map(|m| {
            let uuid = tree.uuid(m.node).to_string();
            (m.path, uuid)
        })
        .collect()
}

/// Write the leaf-path list as `{"leafpaths":["a.b", "a.c"]}`.
///
/// Returns the number of leaves written.
pub fn write_leaf_list(tree: &Tree, sink: &mut impl Write) -> Result<usize, SearchError> {
    let paths = leaf_paths(tree);
    sink.write_all(b"{\"leafpaths\":[")?;
    for (i, path) in paths.iter().enumerate() {
        if i > 0 {
            sink.write_all(b", ")?;
        }
        write!(sink, "\"{}\"", path)?;
    }
    sink.write_all(b"]}")?;
    Ok(paths.len())
}

/// Write the UUID list as `{"leafuuids":[{"a.b", "uuid1"}, ...]}`.
///
/// Returns the number of leaves written.
pub fn write_uuid_list(tree: &Tree, sink: &mut impl Write) -> Result<usize, SearchError> {
    let pairs = uuid_pairs(tree);
    sink.write_all(b"{\"leafuuids\":[")?;
    for (i, (path, uuid)) in pairs.iter().enumerate() {
        if i > 0 {
            sink.write_all(b", ")?;
        }
        write!(sink, "{{\"{}\", \"{}\"}}", path, uuid)?;
    }
    sink.write_all(b"]}")?;
    Ok(pairs.len())
}
