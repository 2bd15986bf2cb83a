//! Repeatable fieldset templates

use std::collections::HashMap;

use pepper_codec::{parse_start_value, Kind, START};
use pepper_dom::{DomTree, NodeId};

use crate::query::fieldset_named;
use crate::{FormError, Markers};

/// Children stripped from a fieldset, kept detached for cloning
#[derive(Debug, Clone)]
pub struct Template {
    /// Fieldset the children came from
    pub fieldset: NodeId,
    /// Detached top-level nodes, in their original order
    pub nodes: Vec<NodeId>,
}

/// Templates and slot markers for one rendering pass
#[derive(Debug, Default)]
pub struct TemplateStore {
    templates: HashMap<NodeId, Template>,
    markers: Markers,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn into_markers(self) -> Markers {
        self.markers
    }

    /// Find the fieldset whose class list names `name`
    pub fn find_fieldset(&self, tree: &DomTree, scope: NodeId, name: &str) -> Result<NodeId, FormError> {
        fieldset_named(tree, scope, name).ok_or_else(|| FormError::FieldsetNotFound(name.to_string()))
    }

    /// Strip the fieldset's children into a template.
    ///
    /// The first call per fieldset empties it; later calls hand back the
    /// same template.
    pub fn extract_template(&mut self, tree: &mut DomTree, fieldset: NodeId) -> Template {
        if let Some(template) = self.templates.get(&fieldset) {
            return template.clone();
        }
        let nodes = tree.take_children(fieldset);
        tracing::debug!("extracted {} template nodes from fieldset {}", nodes.len(), fieldset);
        let template = Template { fieldset, nodes };
        self.templates.insert(fieldset, template.clone());
        template
    }

    /// Append a fresh copy of the template to the fieldset, every element
    /// of it marked unbound. Returns the appended top-level nodes.
    pub fn append_instance(&mut self, tree: &mut DomTree, fieldset: NodeId, template: &Template) -> Vec<NodeId> {
        let mut appended = Vec::with_capacity(template.nodes.len());
        for &node in &template.nodes {
            let clone = tree.deep_clone(node);
            self.mark(tree, clone);
            tree.append_child(fieldset, clone);
            appended.push(clone);
        }
        appended
    }

    /// Mark a bound slot and everything under it
    pub fn clear_marker(&mut self, tree: &DomTree, scope: NodeId) {
        self.markers.mark_bound(scope);
        for id in tree.descendants(scope) {
            self.markers.mark_bound(id);
        }
    }

    fn mark(&mut self, tree: &DomTree, root: NodeId) {
        let elements = std::iter::once(root)
            .chain(tree.descendants(root))
            .filter(|&id| tree.get(id).is_some_and(|n| n.is_element()));
        for id in elements {
            self.markers.mark_unbound(id);
        }
    }
}

/// Name of the sequence a fieldset renders, read from its start marker
pub fn sequence_name(tree: &DomTree, fieldset: NodeId) -> Option<String> {
    group_name(tree, fieldset, Kind::Sequence)
}

/// Name of the first group of `kind` opened directly inside the fieldset
pub(crate) fn group_name(tree: &DomTree, fieldset: NodeId, kind: Kind) -> Option<String> {
    tree.children(fieldset)
        .map(|(id, _)| id)
        .filter(|&id| tree.is_tag(id, "input") && tree.attr(id, "name") == Some(START))
        .filter_map(|id| parse_start_value(tree.attr(id, "value")?).ok())
        .find(|(k, _)| *k == kind)
        .map(|(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pepper_codec::start_value;

    fn fieldset_with_item() -> (DomTree, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let root = tree.root();
        let fieldset = tree.create_element_with_attrs("fieldset", &[("class", "urls")]);
        let container = tree.create_element_with_attrs("div", &[("class", "field")]);
        let input = tree.create_element_with_attrs("input", &[("name", "urls")]);
        tree.append_child(root, fieldset);
        tree.append_child(fieldset, container);
        tree.append_child(container, input);
        (tree, fieldset, input)
    }

    #[test]
    fn test_extract_empties_fieldset_once() {
        let (mut tree, fieldset, _) = fieldset_with_item();
        let mut store = TemplateStore::new();

        let template = store.extract_template(&mut tree, fieldset);
        assert_eq!(template.nodes.len(), 1);
        assert_eq!(tree.children(fieldset).count(), 0);

        let again = store.extract_template(&mut tree, fieldset);
        assert_eq!(again.nodes, template.nodes);
    }

    #[test]
    fn test_append_marks_every_element() {
        let (mut tree, fieldset, _) = fieldset_with_item();
        let mut store = TemplateStore::new();
        let template = store.extract_template(&mut tree, fieldset);

        let first = store.append_instance(&mut tree, fieldset, &template);
        let second = store.append_instance(&mut tree, fieldset, &template);
        assert_eq!(tree.children(fieldset).count(), 2);
        assert_ne!(first, second);
        assert_eq!(store.markers().unbound_count(), 4);
        assert!(store.markers().is_unbound(first[0]));

        store.clear_marker(&tree, first[0]);
        assert_eq!(store.markers().unbound_count(), 2);
        assert!(!store.markers().is_unbound(first[0]));
        assert!(store.markers().is_unbound(second[0]));
    }

    #[test]
    fn test_find_fieldset() {
        let (tree, fieldset, _) = fieldset_with_item();
        let store = TemplateStore::new();
        assert_eq!(store.find_fieldset(&tree, tree.root(), "urls").unwrap(), fieldset);
        assert!(matches!(
            store.find_fieldset(&tree, tree.root(), "people"),
            Err(FormError::FieldsetNotFound(_))
        ));
    }

    #[test]
    fn test_sequence_name() {
        let (mut tree, fieldset, _) = fieldset_with_item();
        assert_eq!(sequence_name(&tree, fieldset), None);

        let value = start_value(Kind::Sequence, "urls");
        let marker = tree.create_element_with_attrs(
            "input",
            &[("type", "hidden"), ("name", START), ("value", &value)],
        );
        tree.append_child(fieldset, marker);
        assert_eq!(sequence_name(&tree, fieldset).as_deref(), Some("urls"));
    }
}
