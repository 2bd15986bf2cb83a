//! Tree walker binding nested data into a form

use pepper_codec::{end_key, start_value, Kind, Mapping, Scalar, Value, START};
use pepper_dom::{DomTree, NodeId};

use crate::query::{error_slot, slot_of};
use crate::{locate, resolve_path, Errors, FormConfig, FormError, Markers, TemplateStore};

/// Walks nested data and writes it into the form under `scope`
pub struct Binder<'a> {
    tree: &'a mut DomTree,
    scope: NodeId,
    config: &'a FormConfig,
    /// Set only while the form is invalid
    errors: Option<&'a Errors>,
    store: TemplateStore,
}

impl<'a> Binder<'a> {
    pub fn new(tree: &'a mut DomTree, scope: NodeId, config: &'a FormConfig) -> Self {
        Self {
            tree,
            scope,
            config,
            errors: None,
            store: TemplateStore::new(),
        }
    }

    /// Render error messages too; an empty map renders none
    pub fn with_errors(mut self, errors: &'a Errors) -> Self {
        self.errors = (!errors.is_empty()).then_some(errors);
        self
    }

    /// Bind every top-level entry
    pub fn bind(&mut self, data: &Mapping) -> Result<(), FormError> {
        for (name, value) in data {
            self.render(name, value)?;
        }
        Ok(())
    }

    /// Bind one named value
    pub fn render(&mut self, name: &str, value: &Value) -> Result<(), FormError> {
        match value {
            Value::Scalar(scalar) => self.bind_scalar(name, scalar),
            Value::Sequence(items) => self.render_sequence(name, items),
            Value::Mapping(mapping) => self.render_mapping(name, mapping, true),
        }
    }

    /// Markers of the pass, for inspection
    pub fn finish(self) -> Markers {
        self.store.into_markers()
    }

    fn render_sequence(&mut self, name: &str, items: &[Value]) -> Result<(), FormError> {
        let fieldset = self.store.find_fieldset(self.tree, self.scope, name)?;
        let template = self.store.extract_template(self.tree, fieldset);
        tracing::debug!("rendering {} items of sequence {:?}", items.len(), name);

        self.push_start(fieldset, Kind::Sequence, name);
        for item in items {
            if let Value::Mapping(mapping) = item {
                self.push_start(fieldset, Kind::Mapping, name);
                self.store.append_instance(self.tree, fieldset, &template);
                self.render_mapping(name, mapping, false)?;
            } else {
                self.store.append_instance(self.tree, fieldset, &template);
                self.render(name, item)?;
            }
        }
        self.push_end(fieldset, name);
        Ok(())
    }

    /// A lone mapping opens its own group at the top of its fieldset;
    /// a sequence item's group was opened by the sequence.
    fn render_mapping(&mut self, name: &str, mapping: &Mapping, standalone: bool) -> Result<(), FormError> {
        let fieldset = self.store.find_fieldset(self.tree, self.scope, name)?;
        if standalone {
            let first = self
                .tree
                .children(fieldset)
                .next()
                .map(|(id, _)| id)
                .unwrap_or(NodeId::NONE);
            let marker = self.start_marker(Kind::Mapping, name);
            self.tree.insert_before(fieldset, marker, first);
        }
        for (key, value) in mapping {
            self.render(key, value)?;
        }
        self.push_end(fieldset, name);
        Ok(())
    }

    fn bind_scalar(&mut self, name: &str, scalar: &Scalar) -> Result<(), FormError> {
        let field = locate(self.tree, self.store.markers(), self.config, self.scope, name)?;

        if let Some(errors) = self.errors {
            let path = resolve_path(self.tree, field);
            let message = errors.get(&path).map(String::as_str).unwrap_or_default();
            match error_slot(self.tree, field, self.config) {
                Some(slot) => self.tree.set_text_content(slot, message),
                None if message.is_empty() => {}
                None => return Err(FormError::MissingErrorSlot(path)),
            }
            tracing::trace!("{} -> {:?}", path, message);
        }

        let text = scalar.to_string();
        if self.tree.is_tag(field, "textarea") {
            self.tree.set_text_content(field, &text);
        } else if self.tree.is_tag(field, "select") {
            self.select_option(field, &text);
        } else {
            self.tree.set_attr(field, "value", &text);
        }

        let slot = slot_of(self.tree, field, self.config);
        self.store.clear_marker(self.tree, slot);
        Ok(())
    }

    fn select_option(&mut self, select: NodeId, value: &str) {
        let options: Vec<NodeId> = self.tree.elements_by_tag(select, &["option"]);
        for option in options {
            let option_value = self
                .tree
                .attr(option, "value")
                .map(str::to_string)
                .unwrap_or_else(|| self.tree.text_content(option));
            if option_value == value {
                self.tree.set_attr(option, "selected", "selected");
            } else {
                self.tree.remove_attr(option, "selected");
            }
        }
    }

    fn start_marker(&mut self, kind: Kind, name: &str) -> NodeId {
        let value = start_value(kind, name);
        self.tree.create_element_with_attrs(
            "input",
            &[("type", "hidden"), ("name", START), ("value", &value)],
        )
    }

    fn push_start(&mut self, fieldset: NodeId, kind: Kind, name: &str) {
        let marker = self.start_marker(kind, name);
        self.tree.append_child(fieldset, marker);
    }

    fn push_end(&mut self, fieldset: NodeId, name: &str) {
        let key = end_key(name);
        let marker = self
            .tree
            .create_element_with_attrs("input", &[("type", "hidden"), ("name", &key)]);
        self.tree.append_child(fieldset, marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence_name;
    use crate::query::fieldset_named;

    const URLS: &str = r#"<form>
        <fieldset class="urls">
          <div class="field">
            <input type="text" name="urls" />
            <div class="error-message"></div>
          </div>
        </fieldset>
        <div class="field">
          <textarea name="notes"></textarea>
          <div class="error-message"></div>
        </div>
    </form>"#;

    fn parse(html: &str) -> (DomTree, NodeId) {
        let document = pepper_html::parse(html).unwrap();
        let tree = document.tree;
        let form = tree.elements_by_tag(tree.root(), &["form"])[0];
        (tree, form)
    }

    fn urls(items: &[&str]) -> Mapping {
        let mut data = Mapping::new();
        data.insert("urls".into(), Value::Sequence(items.iter().map(|s| Value::from(*s)).collect()));
        data
    }

    #[test]
    fn test_sequence_clones_one_slot_per_item() {
        let (mut tree, form) = parse(URLS);
        let config = FormConfig::default();
        let mut binder = Binder::new(&mut tree, form, &config);
        binder.bind(&urls(&["a", "b", "c"])).unwrap();
        let markers = binder.finish();

        let fieldset = fieldset_named(&tree, form, "urls").unwrap();
        let values: Vec<&str> = tree
            .elements_by_tag(fieldset, &["input"])
            .into_iter()
            .filter(|&id| tree.attr(id, "name") == Some("urls"))
            .filter_map(|id| tree.attr(id, "value"))
            .collect();
        assert_eq!(values, vec!["a", "b", "c"]);
        assert_eq!(markers.unbound_count(), 0);
        assert_eq!(sequence_name(&tree, fieldset).as_deref(), Some("urls"));
    }

    #[test]
    fn test_empty_sequence_leaves_only_markers() {
        let (mut tree, form) = parse(URLS);
        let config = FormConfig::default();
        Binder::new(&mut tree, form, &config).bind(&urls(&[])).unwrap();

        let fieldset = fieldset_named(&tree, form, "urls").unwrap();
        let names: Vec<&str> = tree
            .children(fieldset)
            .filter_map(|(id, _)| tree.attr(id, "name"))
            .collect();
        assert_eq!(names, vec!["__start__", "__end__:urls"]);
    }

    #[test]
    fn test_errors_land_next_to_their_field() {
        let (mut tree, form) = parse(URLS);
        let config = FormConfig::default();
        let errors = Errors::from([("urls.1".to_string(), "must be a url".to_string())]);
        let mut binder = Binder::new(&mut tree, form, &config).with_errors(&errors);
        binder.bind(&urls(&["http://a.com", "nope"])).unwrap();

        let fieldset = fieldset_named(&tree, form, "urls").unwrap();
        let slots: Vec<String> = tree
            .elements_by_tag_and_class(fieldset, "div", "error-message")
            .into_iter()
            .map(|id| tree.text_content(id))
            .collect();
        assert_eq!(slots, vec!["".to_string(), "must be a url".to_string()]);
    }

    #[test]
    fn test_textarea_gets_text() {
        let (mut tree, form) = parse(URLS);
        let config = FormConfig::default();
        let mut data = Mapping::new();
        data.insert("notes".into(), Value::from("hello"));
        Binder::new(&mut tree, form, &config).bind(&data).unwrap();

        let textarea = tree.elements_by_tag(form, &["textarea"])[0];
        assert_eq!(tree.text_content(textarea), "hello");
        assert_eq!(tree.attr(textarea, "value"), None);
    }

    #[test]
    fn test_select_marks_chosen_option() {
        let (mut tree, form) = parse(
            r#"<form><select name="color">
                <option value="red" selected>Red</option>
                <option value="blue">Blue</option>
            </select></form>"#,
        );
        let config = FormConfig::default();
        let mut data = Mapping::new();
        data.insert("color".into(), Value::from("blue"));
        Binder::new(&mut tree, form, &config).bind(&data).unwrap();

        let options = tree.elements_by_tag(form, &["option"]);
        assert_eq!(tree.attr(options[0], "selected"), None);
        assert_eq!(tree.attr(options[1], "selected"), Some("selected"));
    }

    #[test]
    fn test_unknown_names_fail() {
        let (mut tree, form) = parse(URLS);
        let config = FormConfig::default();
        let mut binder = Binder::new(&mut tree, form, &config);

        let mut data = Mapping::new();
        data.insert("missing".into(), Value::from("x"));
        assert!(matches!(binder.bind(&data), Err(FormError::FieldNotFound(_))));

        let mut data = Mapping::new();
        data.insert("missing".into(), Value::Sequence(vec![]));
        assert!(matches!(binder.bind(&data), Err(FormError::FieldsetNotFound(_))));
    }
}
