//! Template lookups shared by the locator, path resolver and binder

use pepper_dom::{DomTree, NodeId};

use crate::FormConfig;

/// Tags that hold a field value
pub(crate) const FIELD_TAGS: &[&str] = &["input", "textarea", "select"];

/// Fields named `name` under `scope`, in document order
pub(crate) fn fields_named(tree: &DomTree, scope: NodeId, name: &str) -> Vec<NodeId> {
    tree.elements_by_tag(scope, FIELD_TAGS)
        .into_iter()
        .filter(|&id| tree.attr(id, "name") == Some(name))
        .collect()
}

/// Nearest `fieldset` containing the node
pub(crate) fn enclosing_fieldset(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    tree.find_ancestor(id, |t, a| t.is_tag(a, "fieldset"))
}

/// First `fieldset` under `scope` with `name` as a class token
pub(crate) fn fieldset_named(tree: &DomTree, scope: NodeId, name: &str) -> Option<NodeId> {
    tree.elements_by_tag_and_class(scope, "fieldset", name)
        .into_iter()
        .next()
}

/// The container holding a field and its error slot
pub(crate) fn field_container(tree: &DomTree, field: NodeId, config: &FormConfig) -> Option<NodeId> {
    tree.find_ancestor(field, |t, a| t.has_class(a, &config.field_class))
}

/// The unit a template marker is read from and cleared on: the field's
/// container, or the field itself when it has none
pub(crate) fn slot_of(tree: &DomTree, field: NodeId, config: &FormConfig) -> NodeId {
    field_container(tree, field, config).unwrap_or(field)
}

/// Error-message element inside the field's container
pub(crate) fn error_slot(tree: &DomTree, field: NodeId, config: &FormConfig) -> Option<NodeId> {
    let container = field_container(tree, field, config)?;
    tree.descendants(container)
        .find(|&id| tree.has_class(id, &config.error_class))
}
