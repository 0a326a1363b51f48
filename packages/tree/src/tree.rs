//! The arena tree and its accessor surface.

use bytes::BytesMut;

use vsstree_codec::{EncodeError, NodeKind, NodeRecord, Validation};

use crate::error::TreeError;

/// Index of a node within its owning [`Tree`].
///
/// Handles are only meaningful for the tree that produced them.
/// Accessors panic on a handle from a different tree if it is out of
/// range; there is no cross-tree detection beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(u32);

impl NodeHandle {
    /// The raw arena index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    kind: NodeKind,
    uuid: String,
    description: String,
    datatype: Option<String>,
    min: Option<String>,
    max: Option<String>,
    unit: Option<String>,
    allowed: Vec<String>,
    default_value: Option<String>,
    validation: Validation,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
}

impl Node {
    fn from_record(record: NodeRecord, parent: Option<NodeHandle>) -> Node {
        Node {
            name: record.name,
            kind: record.kind,
            uuid: record.uuid,
            description: record.description,
            datatype: record.datatype,
            min: record.min,
            max: record.max,
            unit: record.unit,
            allowed: record.allowed,
            default_value: record.default_value,
            validation: record.validation,
            parent,
            children: Vec::new(),
        }
    }

    fn to_record(&self, child_count: u8) -> NodeRecord {
        NodeRecord {
            name: self.name.clone(),
            kind: self.kind,
            uuid: self.uuid.clone(),
            description: self.description.clone(),
            datatype: self.datatype.clone(),
            min: self.min.clone(),
            max: self.max.clone(),
            unit: self.unit.clone(),
            allowed: self.allowed.clone(),
            default_value: self.default_value.clone(),
            validation: self.validation,
            child_count,
        }
    }
}

/// A whole signal tree, arena-owned.
///
/// The root is always node 0. Every non-root node is reachable from
/// exactly one parent, and a node's stored child list always has the
/// length its wire record declared.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    max_depth: usize,
}

impl Tree {
    /// Decode a complete tree from an in-memory byte stream.
    ///
    /// The stream must contain exactly one pre-order-encoded root
    /// subtree: ending early or carrying trailing bytes is an error,
    /// and no partial tree is ever returned.
    pub fn decode(data: &[u8]) -> Result<Tree, TreeError> {
        let mut tree = Tree {
            nodes: Vec::new(),
            max_depth: 0,
        };
        let mut buf = data;
        tree.decode_node(&mut buf, None, 1)?;
        if !buf.is_empty() {
            return Err(TreeError::TrailingBytes {
                remaining: buf.len(),
            });
        }
        log::debug!(
            "read tree: {} nodes, max depth {}",
            tree.nodes.len(),
            tree.max_depth
        );
        Ok(tree)
    }

    fn decode_node(
        &mut self,
        buf: &mut &[u8],
        parent: Option<NodeHandle>,
        depth: usize,
    ) -> Result<NodeHandle, TreeError> {
        let record = NodeRecord::decode(buf)?;
        let child_count = record.child_count as usize;
        let handle = NodeHandle(self.nodes.len() as u32);
        self.nodes.push(Node::from_record(record, parent));
        if depth > self.max_depth {
            self.max_depth = depth;
        }
        for _ in 0..child_count {
            let child = self.decode_node(buf, Some(handle), depth + 1)?;
            self.nodes[handle.index()].children.push(child);
        }
        Ok(handle)
    }

    /// Encode the whole tree in pre-order, matching [`Tree::decode`]
    /// byte for byte.
    pub fn encode(&self) -> Result<Vec<u8>, TreeError> {
        let mut buf = BytesMut::new();
        self.encode_node(self.root(), &mut buf)?;
        Ok(buf.to_vec())
    }

    fn encode_node(&self, handle: NodeHandle, buf: &mut BytesMut) -> Result<(), TreeError> {
        let node = &self.nodes[handle.index()];
        if node.children.len() > u8::MAX as usize {
            return Err(EncodeError::TooManyElements {
                field: "children",
                count: node.children.len(),
                max: u8::MAX as usize,
            }
            .into());
        }
        node.to_record(node.children.len() as u8).encode(buf)?;
        for &child in &node.children {
            self.encode_node(child, buf)?;
        }
        Ok(())
    }

    /// Load a tree from a file.
    pub fn read(path: impl AsRef<std::path::Path>) -> Result<Tree, TreeError> {
        let data = std::fs::read(path)?;
        Tree::decode(&data)
    }

    /// Store the tree to a file.
    pub fn write(&self, path: impl AsRef<std::path::Path>) -> Result<(), TreeError> {
        let bytes = self.encode()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Build a new tree holding only a root node. The record's
    /// `child_count` is ignored; child counts are derived from the
    /// materialized child lists.
    pub fn with_root(record: NodeRecord) -> Tree {
        Tree {
            nodes: vec![Node::from_record(record, None)],
            max_depth: 1,
        }
    }

    /// Append a node under `parent` and return its handle.
    pub fn add_child(&mut self, parent: NodeHandle, record: NodeRecord) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len() as u32);
        let depth = self.depth_of(parent) + 1;
        self.nodes.push(Node::from_record(record, Some(parent)));
        self.nodes[parent.index()].children.push(handle);
        if depth > self.max_depth {
            self.max_depth = depth;
        }
        handle
    }

    fn depth_of(&self, handle: NodeHandle) -> usize {
        let mut depth = 1;
        let mut current = handle;
        while let Some(parent) = self.nodes[current.index()].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeHandle {
        NodeHandle(0)
    }

    /// Total number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree is never empty; this exists for API completeness.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth of the deepest node, with the root at depth 1.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn name(&self, handle: NodeHandle) -> &str {
        &self.nodes[handle.index()].name
    }

    pub fn kind(&self, handle: NodeHandle) -> NodeKind {
        self.nodes[handle.index()].kind
    }

    pub fn uuid(&self, handle: NodeHandle) -> &str {
        &self.nodes[handle.index()].uuid
    }

    pub fn description(&self, handle: NodeHandle) -> &str {
        &self.nodes[handle.index()].description
    }

    pub fn validation(&self, handle: NodeHandle) -> Validation {
        self.nodes[handle.index()].validation
    }

    /// Ordered child handles.
    pub fn children(&self, handle: NodeHandle) -> &[NodeHandle] {
        &self.nodes[handle.index()].children
    }

    /// Parent handle, `None` for the root.
    pub fn parent(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.nodes[handle.index()].parent
    }

    /// Datatype name; branch-like nodes have none.
    pub fn datatype(&self, handle: NodeHandle) -> Option<&str> {
        let node = &self.nodes[handle.index()];
        if node.kind.is_branch_like() {
            return None;
        }
        node.datatype.as_deref()
    }

    /// Unit name; branch-like nodes have none.
    pub fn unit(&self, handle: NodeHandle) -> Option<&str> {
        let node = &self.nodes[handle.index()];
        if node.kind.is_branch_like() {
            return None;
        }
        node.unit.as_deref()
    }

    pub fn min(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes[handle.index()].min.as_deref()
    }

    pub fn max(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes[handle.index()].max.as_deref()
    }

    pub fn default_value(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes[handle.index()].default_value.as_deref()
    }

    /// Number of allowed values; 0 for branch-like nodes.
    pub fn num_allowed_elements(&self, handle: NodeHandle) -> usize {
        let node = &self.nodes[handle.index()];
        if node.kind.is_branch_like() {
            return 0;
        }
        node.allowed.len()
    }

    /// Allowed value by index, `None` past the end.
    pub fn allowed_element(&self, handle: NodeHandle, index: usize) -> Option<&str> {
        self.nodes[handle.index()]
            .allowed
            .get(index)
            .map(String::as_str)
    }
}
