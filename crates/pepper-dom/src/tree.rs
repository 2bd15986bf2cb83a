//! DOM Tree (arena-based allocation)
//!
//! Every node lives in one `Vec<Node>`. Detaching a node only unlinks it;
//! the slot stays allocated until the tree is dropped, which keeps every
//! [`NodeId`] stable for the lifetime of a render pass.

use crate::{InternedString, Node, NodeData, NodeId, StringInterner};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(128);
        nodes.push(Node::document());
        Self {
            nodes,
            interner: StringInterner::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena (including detached ones)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned name
    #[inline]
    pub fn resolve(&self, s: InternedString) -> &str {
        self.interner.get(s)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let name = self.interner.intern(tag);
        self.push(Node::element(name))
    }

    /// Create a detached element with attributes
    pub fn create_element_with_attrs(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attr(id, name, value);
        }
        id
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        let name = self.interner.intern(name);
        self.push(Node::doctype(name, public_id.to_string(), system_id.to_string()))
    }

    // ------------------------------------------------------------------
    // Structure mutation
    // ------------------------------------------------------------------

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) || parent == child {
            return;
        }
        self.detach(child);

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Insert `child` before `reference`; appends when `reference` is NONE
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        if !reference.is_valid() {
            self.append_child(parent, child);
            return;
        }
        if !self.contains(parent) || !self.contains(child) || !self.contains(reference) {
            return;
        }
        if self.nodes[reference.index()].parent != parent || child == reference {
            return;
        }
        self.detach(child);

        let prev = self.nodes[reference.index()].prev_sibling;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = reference;
        }
        self.nodes[reference.index()].prev_sibling = child;
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
    }

    /// Unlink a node from its parent; the subtree below it stays intact
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id.index()) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Detach and return all children of `parent`, in order
    pub fn take_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let children: Vec<NodeId> = self.children(parent).map(|(id, _)| id).collect();
        for &child in &children {
            self.detach(child);
        }
        children
    }

    /// Copy a subtree; the copy is detached
    pub fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let Some(node) = self.get(id) else {
            return NodeId::NONE;
        };
        let copy = node.detached_copy();
        let new_id = self.push(copy);

        let children: Vec<NodeId> = self.children(id).map(|(child, _)| child).collect();
        for child in children {
            let cloned = self.deep_clone(child);
            self.append_child(new_id, cloned);
        }
        tracing::trace!("cloned {} -> {}", id, new_id);
        new_id
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Iterate over the direct children of a node
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let first = self.get(parent).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next: first }
    }

    /// Pre-order iteration over all descendants, excluding `scope` itself
    pub fn descendants(&self, scope: NodeId) -> Descendants<'_> {
        let first = self.get(scope).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Descendants { tree: self, scope, next: first }
    }

    /// Iterate from the parent of `id` up to the document node
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        let first = self.get(id).map(|n| n.parent).unwrap_or(NodeId::NONE);
        Ancestors { tree: self, next: first }
    }

    // ------------------------------------------------------------------
    // Element accessors
    // ------------------------------------------------------------------

    /// Tag name of an element node
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        Some(self.resolve(elem.name))
    }

    /// Check if the node is an element with the given tag
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag_name(id).is_some_and(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Get an attribute value
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        let name = self.interner.lookup(name)?;
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Set an attribute on an element; no-op for other node kinds
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let name = self.interner.intern(name);
        if let Some(elem) = self.nodes.get_mut(id.index()).and_then(Node::as_element_mut) {
            elem.set_attr(name, value.to_string());
        }
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        let name = self.interner.lookup(name)?;
        self.nodes.get_mut(id.index())?.as_element_mut()?.remove_attr(name)
    }

    /// Check for a class token
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .is_some_and(|value| value.split_whitespace().any(|token| token == class))
    }

    /// Concatenated text of the node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    /// Replace all children with a single text node (none for empty text)
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if let Some(NodeData::Text(data)) = self.get_mut(id).map(|n| &mut n.data) {
            data.content = text.to_string();
            return;
        }
        self.take_children(id);
        if !text.is_empty() {
            let child = self.create_text(text);
            self.append_child(id, child);
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Descendant elements whose tag is one of `tags`, in document order
    pub fn elements_by_tag(&self, scope: NodeId, tags: &[&str]) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&id| {
                self.tag_name(id)
                    .is_some_and(|t| tags.iter().any(|tag| t.eq_ignore_ascii_case(tag)))
            })
            .collect()
    }

    /// Descendant elements with the given tag and class token
    pub fn elements_by_tag_and_class(&self, scope: NodeId, tag: &str, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&id| self.is_tag(id, tag) && self.has_class(id, class))
            .collect()
    }

    /// Nearest strict ancestor matching `pred`
    pub fn find_ancestor(&self, id: NodeId, pred: impl Fn(&Self, NodeId) -> bool) -> Option<NodeId> {
        self.ancestors(id).find(|&a| pred(self, a))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order descendant iterator
pub struct Descendants<'a> {
    tree: &'a DomTree,
    scope: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next;
        let node = self.tree.get(current)?;

        if node.first_child.is_valid() {
            self.next = node.first_child;
            return Some(current);
        }

        // Climb until a node with a next sibling, stopping at the scope
        let mut cursor = current;
        self.next = NodeId::NONE;
        while cursor != self.scope {
            let Some(n) = self.tree.get(cursor) else {
                break;
            };
            if n.next_sibling.is_valid() {
                self.next = n.next_sibling;
                break;
            }
            cursor = n.parent;
        }
        Some(current)
    }
}

/// Ancestor iterator (parent first)
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next;
        let node = self.tree.get(current)?;
        self.next = node.parent;
        Some(current)
    }
}
