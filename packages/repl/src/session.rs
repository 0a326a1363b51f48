//! Browsing state over one loaded tree.

use std::path::{Path, PathBuf};

use nu_ansi_term::Color;

use vsstree_tree::{NodeHandle, Tree, TreeError};

/// One loaded tree plus a cursor: the current node and which of its
/// children is selected for the next `down`.
pub struct Session {
    tree: Tree,
    file: PathBuf,
    current: NodeHandle,
    current_child: usize,
}

impl Session {
    /// Load the tree from `file` and place the cursor on the root.
    pub fn open(file: &Path) -> Result<Session, TreeError> {
        let tree = Tree::read(file)?;
        let current = tree.root();
        Ok(Session {
            tree,
            file: file.to_path_buf(),
            current,
            current_child: 0,
        })
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn current(&self) -> NodeHandle {
        self.current
    }

    /// Dotted path from the root to the current node.
    pub fn current_path(&self) -> String {
        let mut names = vec![self.tree.name(self.current)];
        let mut node = self.current;
        while let Some(parent) = self.tree.parent(node) {
            names.push(self.tree.name(parent));
            node = parent;
        }
        names.reverse();
        names.join(".")
    }

    /// Move to the parent, if any.
    pub fn up(&mut self) {
        if let Some(parent) = self.tree.parent(self.current) {
            self.current = parent;
            self.current_child = 0;
        }
    }

    /// Move to the selected child, if any.
    pub fn down(&mut self) {
        if let Some(&child) = self.tree.children(self.current).get(self.current_child) {
            self.current = child;
            self.current_child = 0;
        }
    }

    /// Select the previous sibling child.
    pub fn left(&mut self) {
        self.current_child = self.current_child.saturating_sub(1);
    }

    /// Select the next sibling child.
    pub fn right(&mut self) {
        let children = self.tree.children(self.current).len();
        if self.current_child + 1 < children {
            self.current_child += 1;
        }
    }

    /// Write the tree back to the file it was loaded from.
    pub fn write_back(&self) -> Result<(), TreeError> {
        self.tree.write(&self.file)
    }

    /// Multi-line display of the current node.
    pub fn show_current(&self) -> String {
        let tree = &self.tree;
        let node = self.current;
        let mut out = format!(
            "\nNode: name = {}, type = {}, uuid = {}, validate = {}, children = {}\n",
            Color::Cyan.bold().paint(tree.name(node)),
            tree.kind(node),
            tree.uuid(node),
            tree.validation(node).as_u8(),
            tree.children(node).len(),
        );
        if !tree.description(node).is_empty() {
            out.push_str(&format!("description = {}\n", tree.description(node)));
        }
        if let Some(&child) = tree.children(node).get(self.current_child) {
            out.push_str(&format!(
                "child[{}] = {}\n",
                self.current_child,
                Color::Cyan.paint(tree.name(child))
            ));
        }
        if let Some(datatype) = tree.datatype(node) {
            out.push_str(&format!("datatype = {}\n", datatype));
        }
        if let Some(unit) = tree.unit(node) {
            out.push_str(&format!("unit = {}\n", unit));
        }
        let allowed = tree.num_allowed_elements(node);
        if allowed > 0 {
            let elements: Vec<&str> = (0..allowed)
                .filter_map(|i| tree.allowed_element(node, i))
                .collect();
            out.push_str(&format!("allowed = [{}]\n", elements.join(", ")));
        }
        out
    }
}
