//! Subtree metadata extraction.

use serde::{Serialize, Serializer};

use vsstree_tree::{NodeKind, Tree, Validation};

use crate::error::SearchError;
use crate::matcher::{search, SearchOptions};

/// Kind, path and validation of one node in a subtree listing.
///
/// Serializes with the kind as its wire name and the validation as its
/// numeric wire value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeMetadata {
    pub path: String,
    #[serde(rename = "type", serialize_with = "kind_as_str")]
    pub kind: NodeKind,
    #[serde(serialize_with = "validation_as_u8")]
    pub validation: Validation,
}

fn kind_as_str<S: Serializer>(kind: &NodeKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(kind)
}

fn validation_as_u8<S: Serializer>(
    validation: &Validation,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(validation.as_u8())
}

/// List the nodes of the subtree at `subtree_path`, `depth` levels
/// deep (the subtree root is level one).
///
/// `subtree_path` is resolved with an exact search from the tree root;
/// the listing then re-searches from the resolved node with patterns
/// of trailing wildcard segments, one per level, so paths in the
/// result are relative to the subtree root.
pub fn subtree_metadata(
    tree: &Tree,
    subtree_path: &str,
    depth: usize,
) -> Result<Vec<NodeMetadata>, SearchError> {
    let resolved = search(tree, tree.root(), subtree_path, &SearchOptions::default());
    let subtree = match resolved.matches.last() {
        Some(m) => m.node,
        None => {
            return Err(SearchError::SubtreeNotFound {
                path: subtree_path.to_string(),
            })
        }
    };

    let mut pattern = tree.name(subtree).to_string();
    let mut nodes = Vec::new();
    for level in 0..depth.max(1) {
        if level > 0 {
            pattern.push_str(".*");
        }
        let result = search(tree, subtree, &pattern, &SearchOptions::default());
        nodes.extend(result.matches.into_iter().map(|m| NodeMetadata {
            kind: tree.kind(m.node),
            validation: tree.validation(m.node),
            path: m.path,
        }));
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsstree_tree::NodeRecord;

    fn cabin_tree() -> Tree {
        let mut tree = Tree::with_root(NodeRecord::new("Vehicle", NodeKind::Branch));
        let root = tree.root();
        tree.add_child(root, NodeRecord::new("Speed", NodeKind::Sensor));
        let cabin = tree.add_child(root, NodeRecord::new("Cabin", NodeKind::Branch));
        let door = tree.add_child(
            cabin,
            NodeRecord {
                name: "Door".to_string(),
                kind: NodeKind::Branch,
                ..NodeRecord::default()
            },
        );
        tree.add_child(
            door,
            NodeRecord {
                name: "IsOpen".to_string(),
                kind: NodeKind::Actuator,
                validation: Validation::ReadWriteConsent,
                ..NodeRecord::default()
            },
        );
        tree
    }

    #[test]
    fn depth_one_lists_only_the_subtree_root() {
        let tree = cabin_tree();
        let nodes = subtree_metadata(&tree, "Vehicle.Cabin", 1).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].path, "Cabin");
        assert_eq!(nodes[0].kind, NodeKind::Branch);
    }

    #[test]
    fn deeper_levels_accumulate() {
        let tree = cabin_tree();
        let nodes = subtree_metadata(&tree, "Vehicle.Cabin", 3).unwrap();
        let paths: Vec<&str> = nodes.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, ["Cabin", "Cabin.Door", "Cabin.Door.IsOpen"]);
        assert_eq!(nodes[2].kind, NodeKind::Actuator);
        assert_eq!(nodes[2].validation, Validation::ReadWriteConsent);
    }

    #[test]
    fn depth_zero_is_treated_as_one() {
        let tree = cabin_tree();
        let nodes = subtree_metadata(&tree, "Vehicle.Cabin", 0).unwrap();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn metadata_serializes_with_wire_names() {
        let tree = cabin_tree();
        let nodes = subtree_metadata(&tree, "Vehicle.Cabin", 3).unwrap();
        let json = serde_json::to_value(&nodes[2]).unwrap();
        assert_eq!(json["path"], "Cabin.Door.IsOpen");
        assert_eq!(json["type"], "actuator");
        assert_eq!(json["validation"], 12);
    }

    #[test]
    fn unresolved_path_is_an_error() {
        let tree = cabin_tree();
        let err = subtree_metadata(&tree, "Vehicle.Trunk", 2).unwrap_err();
        assert!(matches!(err, SearchError::SubtreeNotFound { .. }));
    }
}
