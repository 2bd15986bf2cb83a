//! Validation gateway

use std::collections::HashMap;
use std::sync::Arc;

use pepper_codec::{Scalar, Value};
use pepper_schema::Schema;

use crate::{Errors, FormConfig, FormError, FormSpec, SchemaRef};

/// Named schemas, filled once by the embedding application
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<Schema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema, replacing any previous one with the same name
    pub fn register(&mut self, name: impl Into<String>, schema: impl Into<Arc<Schema>>) -> &mut Self {
        let name = name.into();
        tracing::debug!("registered schema {:?}", name);
        self.schemas.insert(name, schema.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Runs a form's data through its schema and records the errors
pub struct ValidationGateway<'r> {
    registry: &'r SchemaRegistry,
    schema_field: String,
}

impl<'r> ValidationGateway<'r> {
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self::with_config(registry, &FormConfig::default())
    }

    pub fn with_config(registry: &'r SchemaRegistry, config: &FormConfig) -> Self {
        Self {
            registry,
            schema_field: config.schema_field.clone(),
        }
    }

    /// Resolve a schema reference
    pub fn resolve(&self, schema: &SchemaRef) -> Result<Arc<Schema>, FormError> {
        match schema {
            SchemaRef::Instance(schema) => Ok(Arc::clone(schema)),
            SchemaRef::Name(name) => self
                .registry
                .get(name)
                .ok_or_else(|| FormError::SchemaNotFound(name.clone())),
        }
    }

    /// Validate in place.
    ///
    /// A schema name submitted as a form field is moved out of the data and
    /// becomes the schema reference. Only a string is taken; any other value
    /// under that key stays in the data. On return `spec.errors` is set: empty
    /// when the data is valid, one message per failing path otherwise.
    pub fn validate<'s>(&self, spec: &'s mut FormSpec) -> Result<&'s mut FormSpec, FormError> {
        if let Some(Value::Scalar(Scalar::Str(name))) = spec.data.get(&self.schema_field) {
            spec.schema = SchemaRef::Name(name.clone());
            spec.data.shift_remove(&self.schema_field);
        }
        let schema = self.resolve(&spec.schema)?;

        let errors: Errors = match schema.validate(&Value::Mapping(spec.data.clone())) {
            Ok(()) => Errors::new(),
            Err(invalid) => invalid
                .errors
                .into_iter()
                .map(|(path, error)| (path, error.message))
                .collect(),
        };
        if errors.is_empty() {
            tracing::debug!("form data is valid");
        } else {
            tracing::info!("form data has {} error(s)", errors.len());
        }
        spec.errors = Some(errors);
        Ok(spec)
    }
}
