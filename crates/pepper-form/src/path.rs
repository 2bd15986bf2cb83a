//! Positional path of a bound field

use pepper_codec::Kind;
use pepper_dom::{DomTree, NodeId};

use crate::query::{enclosing_fieldset, fields_named};
use crate::template::{group_name, sequence_name};

/// Derive the error key of a field from where it sits in the tree.
///
/// The ordinal is the field's position among same-named fields of its
/// fieldset. A field outside any fieldset is addressed by its bare name.
/// When the sequence and the field share a name the path is
/// `name.ordinal`, otherwise `sequence.ordinal.name`. A fieldset holding a
/// lone mapping addresses its members as `mapping.name`. Lone mappings
/// enclosing that fieldset prefix their names, outermost first
/// (`contact.phones.0`); the walk stops at the first sequence fieldset.
pub fn resolve_path(tree: &DomTree, field: NodeId) -> String {
    let name = tree.attr(field, "name").unwrap_or_default();
    let Some(fieldset) = enclosing_fieldset(tree, field) else {
        return name.to_string();
    };

    // Same-named fields before this one, i.e. count up to it minus one
    let ordinal = fields_named(tree, fieldset, name)
        .into_iter()
        .take_while(|&f| f != field)
        .count();

    let mut path = match sequence_name(tree, fieldset) {
        Some(sequence) if sequence != name => format!("{sequence}.{ordinal}.{name}"),
        Some(_) => format!("{name}.{ordinal}"),
        None => match group_name(tree, fieldset, Kind::Mapping) {
            Some(mapping) => format!("{mapping}.{name}"),
            None => format!("{name}.{ordinal}"),
        },
    };

    let mut inner = fieldset;
    while let Some(outer) = enclosing_fieldset(tree, inner) {
        if sequence_name(tree, outer).is_some() {
            break;
        }
        let Some(mapping) = group_name(tree, outer, Kind::Mapping) else {
            break;
        };
        path = format!("{mapping}.{path}");
        inner = outer;
    }
    path
}
