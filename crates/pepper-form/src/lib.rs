//! pepper form
//!
//! Renders validated, nested form data back into an HTML form template.
//!
//! A template holds one `fieldset` per repeatable group. Rendering a
//! sequence strips the fieldset's children into a template, then appends
//! one fresh clone per item. Leaf values carry no path, so every bound
//! field's path (`people.1.age`) is re-derived from where it sits: its
//! enclosing fieldset and its position among same-named fields. That path
//! is the key into the validation errors shown next to the field.
//!
//! # Example
//! ```rust,ignore
//! use pepper_form::{Form, FormSpec, SchemaRegistry, ValidationGateway};
//!
//! let mut registry = SchemaRegistry::new();
//! registry.register("myschema", schema);
//!
//! let mut form = Form::new(template, FormSpec::new("myschema", data));
//! form.validate(&ValidationGateway::new(&registry))?;
//! let html = form.transform()?;
//! ```

mod binder;
mod config;
mod form;
mod form_spec;
mod gateway;
mod locator;
mod markers;
mod path;
mod query;
mod template;

use std::fmt;

pub use binder::Binder;
pub use config::FormConfig;
pub use form::{Form, RenderedForm};
pub use form_spec::{Errors, FormSpec, SchemaRef};
pub use gateway::{SchemaRegistry, ValidationGateway};
pub use locator::locate;
pub use markers::{Markers, SlotState};
pub use path::resolve_path;
pub use template::{sequence_name, Template, TemplateStore};

pub use pepper_codec::{Mapping, Scalar, Value};
pub use pepper_schema::{Schema, Validator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Why several fields matched one name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguityCause {
    /// More than one match is an unbound template instance
    DuplicateTemplates,
    /// Matches live in different fieldsets
    SplitAcrossFieldsets,
    /// More than one plain (already bound or static) match
    DuplicateFields,
}

impl fmt::Display for AmbiguityCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AmbiguityCause::DuplicateTemplates => "more than one template element",
            AmbiguityCause::SplitAcrossFieldsets => "present in more than one fieldset",
            AmbiguityCause::DuplicateFields => "more than one form element",
        })
    }
}

/// Form rendering error
///
/// Validation failures are not errors: they are recorded in
/// [`FormSpec::errors`] and rendered next to the offending fields.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Schema not found: {0:?}")]
    SchemaNotFound(String),

    #[error("Could not find field {0:?}")]
    FieldNotFound(String),

    #[error("Ambiguous field {name:?}: {cause}")]
    AmbiguousField { name: String, cause: AmbiguityCause },

    #[error("Could not find fieldset {0:?}")]
    FieldsetNotFound(String),

    #[error("Could not find the form element")]
    FormNotFound,

    #[error("No error slot for field at {0:?}")]
    MissingErrorSlot(String),

    #[error("Form data must be a mapping, got a {0}")]
    DataNotMapping(&'static str),

    #[error(transparent)]
    Parse(#[from] pepper_html::ParseError),

    #[error(transparent)]
    Codec(#[from] pepper_codec::CodecError),
}
