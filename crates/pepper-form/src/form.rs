//! Form facade

use pepper_dom::{Document, DomTree, NodeId};
use pepper_html::HtmlParser;

use crate::{Binder, FormConfig, FormError, FormSpec, Markers, SchemaRef, ValidationGateway};

/// A template paired with the data to render into it
#[derive(Debug, Clone)]
pub struct Form {
    template: String,
    spec: FormSpec,
    config: FormConfig,
}

/// Result of a rendering pass
#[derive(Debug)]
pub struct RenderedForm {
    pub document: Document,
    /// The form element data was bound under
    pub form: NodeId,
    pub markers: Markers,
}

impl RenderedForm {
    pub fn tree(&self) -> &DomTree {
        &self.document.tree
    }

    pub fn to_html(&self) -> String {
        pepper_html::serialize(&self.document)
    }
}

impl Form {
    pub fn new(template: impl Into<String>, spec: FormSpec) -> Self {
        Self::with_config(template, spec, FormConfig::default())
    }

    pub fn with_config(template: impl Into<String>, spec: FormSpec, config: FormConfig) -> Self {
        Self {
            template: template.into(),
            spec,
            config,
        }
    }

    /// Build from submitted `(name, value)` pairs in their flattened
    /// start/end marker encoding
    pub fn from_fields<I, K, V>(
        template: impl Into<String>,
        schema: impl Into<SchemaRef>,
        fields: I,
        config: FormConfig,
    ) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let data = pepper_codec::parse_pairs(fields)?;
        let spec = FormSpec::from_value(schema, data)?;
        Ok(Self::with_config(template, spec, config))
    }

    pub fn spec(&self) -> &FormSpec {
        &self.spec
    }

    pub fn spec_mut(&mut self) -> &mut FormSpec {
        &mut self.spec
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn validate(&mut self, gateway: &ValidationGateway<'_>) -> Result<&FormSpec, FormError> {
        gateway.validate(&mut self.spec)?;
        Ok(&self.spec)
    }

    /// True unless validation ran and found errors
    pub fn is_valid(&self) -> bool {
        self.spec.is_valid()
    }

    /// Parse a fresh copy of the template and bind the data into it
    pub fn render(&self) -> Result<RenderedForm, FormError> {
        let mut document = HtmlParser::new().parse(&self.template)?;
        let form = self.form_root(&document.tree)?;

        let mut binder = Binder::new(&mut document.tree, form, &self.config);
        if let Some(errors) = self.spec.errors.as_ref() {
            binder = binder.with_errors(errors);
        }
        binder.bind(&self.spec.data)?;
        let markers = binder.finish();

        tracing::debug!(
            "rendered {} field(s), valid: {}",
            self.spec.data.len(),
            self.is_valid()
        );
        Ok(RenderedForm { document, form, markers })
    }

    /// Render to HTML
    pub fn transform(&self) -> Result<String, FormError> {
        Ok(self.render()?.to_html())
    }

    /// The parent of the hidden input carrying the schema name, else the
    /// first `form` element
    fn form_root(&self, tree: &DomTree) -> Result<NodeId, FormError> {
        let carrier = self.spec.schema.name().and_then(|name| {
            tree.elements_by_tag(tree.root(), &["input"])
                .into_iter()
                .find(|&id| tree.attr(id, "value") == Some(name))
        });
        if let Some(parent) = carrier.and_then(|id| tree.get(id)).map(|n| n.parent) {
            if parent.is_valid() {
                return Ok(parent);
            }
        }

        match self.spec.schema.name() {
            Some(name) => tracing::warn!("no input carries schema {:?}, using the first form element", name),
            None => tracing::debug!("using the first form element"),
        }
        tree.elements_by_tag(tree.root(), &["form"])
            .into_iter()
            .next()
            .ok_or(FormError::FormNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pepper_codec::{Mapping, Value};

    const TEMPLATE: &str = r#"<form action="/submit">
        <input type="hidden" name="schema" value="myschema" />
        <div class="field"><input type="text" name="title" /><div class="error-message"></div></div>
    </form>"#;

    fn title(text: &str) -> Mapping {
        let mut data = Mapping::new();
        data.insert("title".into(), Value::from(text));
        data
    }

    #[test]
    fn test_form_root_by_schema_input() {
        let form = Form::new(TEMPLATE, FormSpec::new("myschema", title("hi")));
        let rendered = form.render().unwrap();
        assert!(rendered.tree().is_tag(rendered.form, "form"));
        assert!(rendered.to_html().contains(r#"value="hi""#));
    }

    #[test]
    fn test_form_root_falls_back_to_form_element() {
        let form = Form::new(TEMPLATE, FormSpec::new("other", title("hi")));
        let rendered = form.render().unwrap();
        assert!(rendered.tree().is_tag(rendered.form, "form"));
    }

    #[test]
    fn test_missing_form() {
        let form = Form::new("<p>nothing</p>", FormSpec::new("myschema", title("hi")));
        assert!(matches!(form.transform(), Err(FormError::FormNotFound)));
    }

    #[test]
    fn test_unvalidated_form_renders_no_errors() {
        let form = Form::new(TEMPLATE, FormSpec::new("myschema", title("hi")));
        assert!(form.is_valid());
        let rendered = form.render().unwrap();
        let tree = rendered.tree();
        let slot = tree.elements_by_tag_and_class(rendered.form, "div", "error-message")[0];
        assert_eq!(tree.text_content(slot), "");
    }

    #[test]
    fn test_from_fields() {
        let fields = [
            ("title", "hello"),
            ("__start__", "sequence:tags"),
            ("tags", "a"),
            ("__end__:tags", ""),
        ];
        let form = Form::from_fields(TEMPLATE, "myschema", fields, FormConfig::default()).unwrap();
        assert_eq!(form.spec().data["title"], Value::from("hello"));
        assert_eq!(form.spec().data["tags"], Value::Sequence(vec![Value::from("a")]));
    }

    #[test]
    fn test_from_fields_rejects_broken_markers() {
        let fields = [("__start__", "sequence:tags"), ("tags", "a")];
        let err = Form::from_fields(TEMPLATE, "myschema", fields, FormConfig::default()).unwrap_err();
        assert!(matches!(err, FormError::Codec(_)));
    }
}
