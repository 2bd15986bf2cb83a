//! Schema nodes and structural validation

use indexmap::IndexMap;
use pepper_codec::{Scalar, Value};

use crate::validator::numeric;
use crate::{FieldError, Invalid, Validator};

/// Structural type of a schema node
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// Named members, validated in declaration order
    Structure(Vec<(String, Schema)>),
    /// Homogeneous list of items
    Sequence(Box<Schema>),
    String,
    Integer,
    Float,
    Boolean,
}

/// Schema node: a structural type plus validators
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    kind: SchemaKind,
    validators: Vec<Validator>,
}

impl Schema {
    fn of(kind: SchemaKind) -> Self {
        Self { kind, validators: Vec::new() }
    }

    /// Empty structure; members are added with [`Schema::add`]
    pub fn structure() -> Self {
        Self::of(SchemaKind::Structure(Vec::new()))
    }

    pub fn sequence(item: Schema) -> Self {
        Self::of(SchemaKind::Sequence(Box::new(item)))
    }

    pub fn string() -> Self {
        Self::of(SchemaKind::String)
    }

    pub fn integer() -> Self {
        Self::of(SchemaKind::Integer)
    }

    pub fn float() -> Self {
        Self::of(SchemaKind::Float)
    }

    pub fn boolean() -> Self {
        Self::of(SchemaKind::Boolean)
    }

    /// Attach a validator
    pub fn with(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Add (or replace) a structure member; ignored for other kinds
    pub fn add(&mut self, name: impl Into<String>, member: Schema) -> &mut Self {
        let name = name.into();
        if let SchemaKind::Structure(members) = &mut self.kind {
            match members.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = member,
                None => members.push((name, member)),
            }
        }
        self
    }

    /// Builder form of [`Schema::add`]
    pub fn member(mut self, name: impl Into<String>, member: Schema) -> Self {
        self.add(name, member);
        self
    }

    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Look up a structure member
    pub fn get(&self, name: &str) -> Option<&Schema> {
        match &self.kind {
            SchemaKind::Structure(members) => {
                members.iter().find(|(n, _)| n == name).map(|(_, s)| s)
            }
            _ => None,
        }
    }

    pub fn is_required(&self) -> bool {
        self.validators.contains(&Validator::Required)
    }

    /// Validate a value; on failure every failing path is reported
    pub fn validate(&self, value: &Value) -> Result<(), Invalid> {
        let mut errors = IndexMap::new();
        self.check("", value, &mut errors);

        if errors.is_empty() {
            tracing::trace!("value is valid");
            Ok(())
        } else {
            tracing::debug!("validation failed at {} path(s)", errors.len());
            Err(Invalid { errors })
        }
    }

    fn check(&self, path: &str, value: &Value, errors: &mut IndexMap<String, FieldError>) {
        if is_missing(value) {
            if self.is_required() {
                errors.insert(path.to_string(), FieldError::new("is required"));
            }
            return;
        }

        if let Err(message) = self.check_kind(path, value, errors) {
            errors.insert(path.to_string(), FieldError::new(message));
            return;
        }

        if let Some(message) = self.validators.iter().find_map(|v| v.check(value)) {
            errors.insert(path.to_string(), FieldError::new(message));
        }
    }

    /// Type check, recursing into containers
    fn check_kind(
        &self,
        path: &str,
        value: &Value,
        errors: &mut IndexMap<String, FieldError>,
    ) -> Result<(), &'static str> {
        match (&self.kind, value) {
            (SchemaKind::Structure(members), Value::Mapping(mapping)) => {
                let null = Value::null();
                for (name, member) in members {
                    let child = mapping.get(name).unwrap_or(&null);
                    member.check(&join(path, name), child, errors);
                }
                Ok(())
            }
            (SchemaKind::Structure(_), _) => Err("must be a mapping"),
            (SchemaKind::Sequence(item), Value::Sequence(items)) => {
                for (i, child) in items.iter().enumerate() {
                    item.check(&join(path, &i.to_string()), child, errors);
                }
                Ok(())
            }
            (SchemaKind::Sequence(_), _) => Err("must be a sequence"),
            (SchemaKind::String, Value::Scalar(_)) => Ok(()),
            (SchemaKind::String, _) => Err("must be a string"),
            (SchemaKind::Integer, Value::Scalar(scalar)) => match scalar {
                Scalar::Int(_) => Ok(()),
                Scalar::Str(s) if s.trim().parse::<i64>().is_ok() => Ok(()),
                _ => Err("must be an integer"),
            },
            (SchemaKind::Integer, _) => Err("must be an integer"),
            (SchemaKind::Float, Value::Scalar(scalar)) if numeric(scalar).is_some() => Ok(()),
            (SchemaKind::Float, _) => Err("must be a number"),
            (SchemaKind::Boolean, Value::Scalar(Scalar::Bool(_))) => Ok(()),
            (SchemaKind::Boolean, Value::Scalar(Scalar::Str(s)))
                if matches!(s.as_str(), "true" | "false" | "on" | "off" | "1" | "0") =>
            {
                Ok(())
            }
            (SchemaKind::Boolean, _) => Err("must be a boolean"),
        }
    }
}

/// Null, blank strings and empty sequences count as missing
fn is_missing(value: &Value) -> bool {
    match value {
        Value::Scalar(s) => s.is_blank(),
        Value::Sequence(items) => items.is_empty(),
        Value::Mapping(_) => false,
    }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}
