//! Form data bundle

use std::collections::BTreeMap;
use std::sync::Arc;

use pepper_codec::{Mapping, Value};
use pepper_schema::Schema;

use crate::FormError;

/// Flat `path -> message` validation errors
pub type Errors = BTreeMap<String, String>;

/// How a form names its schema
#[derive(Debug, Clone)]
pub enum SchemaRef {
    /// Looked up in a [`SchemaRegistry`](crate::SchemaRegistry)
    Name(String),
    /// Used directly
    Instance(Arc<Schema>),
}

impl SchemaRef {
    pub fn name(&self) -> Option<&str> {
        match self {
            SchemaRef::Name(name) => Some(name),
            SchemaRef::Instance(_) => None,
        }
    }
}

impl From<&str> for SchemaRef {
    fn from(name: &str) -> Self {
        SchemaRef::Name(name.to_string())
    }
}

impl From<String> for SchemaRef {
    fn from(name: String) -> Self {
        SchemaRef::Name(name)
    }
}

impl From<Schema> for SchemaRef {
    fn from(schema: Schema) -> Self {
        SchemaRef::Instance(Arc::new(schema))
    }
}

impl From<Arc<Schema>> for SchemaRef {
    fn from(schema: Arc<Schema>) -> Self {
        SchemaRef::Instance(schema)
    }
}

/// Schema reference, data and (once validated) errors
#[derive(Debug, Clone)]
pub struct FormSpec {
    pub schema: SchemaRef,
    pub data: Mapping,
    /// `None` until validated; `Some(empty)` when valid
    pub errors: Option<Errors>,
}

impl FormSpec {
    pub fn new(schema: impl Into<SchemaRef>, data: Mapping) -> Self {
        Self {
            schema: schema.into(),
            data,
            errors: None,
        }
    }

    /// Build from any value; the value must be a mapping
    pub fn from_value(schema: impl Into<SchemaRef>, data: Value) -> Result<Self, FormError> {
        match data {
            Value::Mapping(mapping) => Ok(Self::new(schema, mapping)),
            other => Err(FormError::DataNotMapping(other.kind())),
        }
    }

    pub fn is_validated(&self) -> bool {
        self.errors.is_some()
    }

    /// Unvalidated data counts as valid: nothing to show
    pub fn is_valid(&self) -> bool {
        self.errors.as_ref().is_none_or(BTreeMap::is_empty)
    }

    /// Message for one path
    pub fn error(&self, path: &str) -> Option<&str> {
        self.errors.as_ref()?.get(path).map(String::as_str)
    }
}
