//! Nested JSON export of a whole tree.
//!
//! One object per node: name, type, uuid, plus whatever leaf metadata
//! the node carries; children are a pre-order array. Absent fields are
//! omitted rather than emitted as null.

use std::io::Write;

use serde::Serialize;

use vsstree_tree::{NodeHandle, Tree};

use crate::error::SearchError;

#[derive(Serialize)]
struct JsonNode<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "str_is_empty")]
    uuid: &'a str,
    #[serde(skip_serializing_if = "str_is_empty")]
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    datatype: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    allowed: Vec<&'a str>,
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    default_value: Option<&'a str>,
    #[serde(rename = "validate", skip_serializing_if = "str_is_empty")]
    validation: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonNode<'a>>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn str_is_empty(s: &&str) -> bool {
    s.is_empty()
}

fn json_node(tree: &Tree, handle: NodeHandle) -> JsonNode<'_> {
    JsonNode {
        name: tree.name(handle),
        kind: tree.kind(handle).wire_name(),
        uuid: tree.uuid(handle),
        description: tree.description(handle),
        datatype: tree.datatype(handle),
        min: tree.min(handle),
        max: tree.max(handle),
        unit: tree.unit(handle),
        allowed: (0..tree.num_allowed_elements(handle))
            .filter_map(|i| tree.allowed_element(handle, i))
            .collect(),
        default_value: tree.default_value(handle),
        validation: tree.validation(handle).wire_string(),
        children: tree
            .children(handle)
            .iter()
            .map(|&child| json_node(tree, child))
            .collect(),
    }
}

/// The subtree at `node` as a JSON value.
pub fn to_json(tree: &Tree, node: NodeHandle) -> Result<serde_json::Value, SearchError> {
    Ok(serde_json::to_value(json_node(tree, node))?)
}

/// Write the whole tree as pretty-printed JSON.
pub fn write_json(tree: &Tree, sink: &mut impl Write) -> Result<(), SearchError> {
    serde_json::to_writer_pretty(&mut *sink, &json_node(tree, tree.root()))?;
    sink.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsstree_tree::{NodeKind, NodeRecord, Validation};

    fn demo_tree() -> Tree {
        let mut tree = Tree::with_root(NodeRecord {
            name: "Vehicle".to_string(),
            kind: NodeKind::Branch,
            uuid: "root-uuid".to_string(),
            description: "Top branch".to_string(),
            ..NodeRecord::default()
        });
        tree.add_child(
            tree.root(),
            NodeRecord {
                name: "Gear".to_string(),
                kind: NodeKind::Actuator,
                datatype: Some("string".to_string()),
                allowed: vec!["PARK".to_string(), "DRIVE".to_string()],
                default_value: Some("PARK".to_string()),
                validation: Validation::ReadWrite,
                ..NodeRecord::default()
            },
        );
        tree
    }

    #[test]
    fn export_shape() {
        let tree = demo_tree();
        let json = to_json(&tree, tree.root()).unwrap();

        assert_eq!(json["name"], "Vehicle");
        assert_eq!(json["type"], "branch");
        assert_eq!(json["uuid"], "root-uuid");
        // Branch carries no leaf metadata.
        assert!(json.get("datatype").is_none());
        assert!(json.get("validate").is_none());

        let gear = &json["children"][0];
        assert_eq!(gear["name"], "Gear");
        assert_eq!(gear["type"], "actuator");
        assert_eq!(gear["datatype"], "string");
        assert_eq!(gear["allowed"], serde_json::json!(["PARK", "DRIVE"]));
        assert_eq!(gear["default"], "PARK");
        assert_eq!(gear["validate"], "read-write");
        // Absent fields are omitted, not null.
        assert!(gear.get("min").is_none());
        assert!(gear.get("children").is_none());
    }

    #[test]
    fn write_json_is_valid_json() {
        let tree = demo_tree();
        let mut out = Vec::new();
        write_json(&tree, &mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["children"][0]["name"], "Gear");
    }

    #[test]
    fn export_of_inner_node() {
        let tree = demo_tree();
        let gear = tree.children(tree.root())[0];
        let json = to_json(&tree, gear).unwrap();
        assert_eq!(json["name"], "Gear");
        assert!(json.get("children").is_none());
    }
}
