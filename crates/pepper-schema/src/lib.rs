//! pepper schema
//!
//! Declarative structure for nested form data. A [`Schema`] is built from
//! structures, sequences and scalar types, each carrying [`Validator`]s.
//! Validation never stops at the first failure: [`Invalid`] reports every
//! failing path, keyed the same way the form renderer addresses fields
//! (`urls.0`, `people.1.age`).

mod schema;
mod validator;

use indexmap::IndexMap;

pub use pepper_codec::{Scalar, Value};
pub use schema::{Schema, SchemaKind};
pub use validator::Validator;

/// Error for a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub message: String,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Validation failure report
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed for {} field(s)", .errors.len())]
pub struct Invalid {
    /// Per-path errors in the order they were found
    pub errors: IndexMap<String, FieldError>,
}

