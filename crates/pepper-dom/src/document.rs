//! Document - High-level document API

use crate::{DomTree, NodeId};

/// Parsed HTML document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create an empty document (no structure)
    pub fn empty() -> Self {
        Self {
            tree: DomTree::new(),
            body_element: NodeId::NONE,
        }
    }

    /// Locate <body> after the tree was built externally
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        self.body_element = tree
            .children(tree.root())
            .map(|(id, _)| id)
            .find(|&id| tree.is_tag(id, "html"))
            .and_then(|html| {
                tree.children(html)
                    .map(|(id, _)| id)
                    .find(|&id| tree.is_tag(id, "body"))
            })
            .unwrap_or(NodeId::NONE);
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}
