//! Field lookup by name

use std::collections::HashSet;

use pepper_dom::{DomTree, NodeId};

use crate::query::{enclosing_fieldset, fields_named, slot_of};
use crate::{AmbiguityCause, FormConfig, FormError, Markers};

/// Find the single field named `name` under `scope`.
///
/// Several matches are only acceptable while a sequence is being rendered:
/// exactly one of them must sit in an unbound template clone, and all of
/// them must share one fieldset. That clone's field wins.
pub fn locate(
    tree: &DomTree,
    markers: &Markers,
    config: &FormConfig,
    scope: NodeId,
    name: &str,
) -> Result<NodeId, FormError> {
    let matches = fields_named(tree, scope, name);
    match matches.as_slice() {
        [] => Err(FormError::FieldNotFound(name.to_string())),
        [only] => Ok(*only),
        _ => {
            let templates: Vec<NodeId> = matches
                .iter()
                .copied()
                .filter(|&f| markers.is_unbound(slot_of(tree, f, config)))
                .collect();
            let fieldsets: HashSet<Option<NodeId>> = matches
                .iter()
                .map(|&f| enclosing_fieldset(tree, f))
                .collect();

            let cause = if templates.len() > 1 {
                AmbiguityCause::DuplicateTemplates
            } else if fieldsets.len() > 1 {
                AmbiguityCause::SplitAcrossFieldsets
            } else if let [template] = templates.as_slice() {
                tracing::trace!("{} matches for {:?}, using template {}", matches.len(), name, template);
                return Ok(*template);
            } else {
                AmbiguityCause::DuplicateFields
            };
            Err(FormError::AmbiguousField {
                name: name.to_string(),
                cause,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `<fieldset><div.field><input name=name></div>...</fieldset>` per group
    fn build(groups: &[usize]) -> (DomTree, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let root = tree.root();
        let mut inputs = Vec::new();
        for &count in groups {
            let fieldset = tree.create_element("fieldset");
            tree.append_child(root, fieldset);
            for _ in 0..count {
                let container = tree.create_element_with_attrs("div", &[("class", "field")]);
                let input = tree.create_element_with_attrs("input", &[("name", "name")]);
                tree.append_child(fieldset, container);
                tree.append_child(container, input);
                inputs.push(input);
            }
        }
        (tree, inputs)
    }

    fn mark(tree: &DomTree, markers: &mut Markers, field: NodeId) {
        let slot = slot_of(tree, field, &FormConfig::default());
        markers.mark_unbound(slot);
    }

    #[test]
    fn test_single_match() {
        let (tree, inputs) = build(&[1]);
        let found = locate(&tree, &Markers::new(), &FormConfig::default(), tree.root(), "name").unwrap();
        assert_eq!(found, inputs[0]);
    }

    #[test]
    fn test_not_found() {
        let (tree, _) = build(&[1]);
        let err = locate(&tree, &Markers::new(), &FormConfig::default(), tree.root(), "age").unwrap_err();
        assert!(matches!(err, FormError::FieldNotFound(name) if name == "age"));
    }

    #[test]
    fn test_picks_the_unbound_clone() {
        let (tree, inputs) = build(&[3]);
        let mut markers = Markers::new();
        mark(&tree, &mut markers, inputs[2]);

        let found = locate(&tree, &markers, &FormConfig::default(), tree.root(), "name").unwrap();
        assert_eq!(found, inputs[2]);
    }

    #[test]
    fn test_ambiguity_causes() {
        let config = FormConfig::default();

        let (tree, inputs) = build(&[2]);
        let mut markers = Markers::new();
        mark(&tree, &mut markers, inputs[0]);
        mark(&tree, &mut markers, inputs[1]);
        let err = locate(&tree, &markers, &config, tree.root(), "name").unwrap_err();
        assert!(matches!(
            err,
            FormError::AmbiguousField { cause: AmbiguityCause::DuplicateTemplates, .. }
        ));

        let (tree, inputs) = build(&[1, 1]);
        let mut markers = Markers::new();
        mark(&tree, &mut markers, inputs[1]);
        let err = locate(&tree, &markers, &config, tree.root(), "name").unwrap_err();
        assert!(matches!(
            err,
            FormError::AmbiguousField { cause: AmbiguityCause::SplitAcrossFieldsets, .. }
        ));

        let (tree, _) = build(&[2]);
        let err = locate(&tree, &Markers::new(), &config, tree.root(), "name").unwrap_err();
        assert!(matches!(
            err,
            FormError::AmbiguousField { cause: AmbiguityCause::DuplicateFields, .. }
        ));
    }
}
