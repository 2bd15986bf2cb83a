//! Field validators
//!
//! Each validator checks one constraint against a value that already
//! passed the schema node's type check.

use pepper_codec::{Scalar, Value};

/// Constraint attached to a schema node
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    /// Value must be present and non-blank
    Required,
    /// Value must be an absolute URL with a host
    Url,
    /// Character count (strings) or item count (sequences)
    Length { min: Option<usize>, max: Option<usize> },
    /// Numeric bounds, inclusive
    Range { min: Option<f64>, max: Option<f64> },
    /// String form must be one of the listed choices
    OneOf(Vec<String>),
}

impl Validator {
    pub fn length(min: Option<usize>, max: Option<usize>) -> Self {
        Validator::Length { min, max }
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Validator::Range { min, max }
    }

    pub fn one_of<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Validator::OneOf(choices.into_iter().map(Into::into).collect())
    }

    /// Check a present value; returns the error message on failure
    pub fn check(&self, value: &Value) -> Option<String> {
        match self {
            // Blank values never reach validators
            Validator::Required => None,
            Validator::Url => {
                let text = value.as_scalar().map(Scalar::to_string).unwrap_or_default();
                match url::Url::parse(&text) {
                    Ok(url) if url.has_host() => None,
                    _ => Some("must be a url".to_string()),
                }
            }
            Validator::Length { min, max } => {
                let len = match value {
                    Value::Scalar(s) => s.to_string().chars().count(),
                    Value::Sequence(items) => items.len(),
                    Value::Mapping(m) => m.len(),
                };
                if let Some(min) = min.filter(|&min| len < min) {
                    return Some(format!("must be at least {min} long"));
                }
                if let Some(max) = max.filter(|&max| len > max) {
                    return Some(format!("must be at most {max} long"));
                }
                None
            }
            Validator::Range { min, max } => {
                let number = value.as_scalar().and_then(numeric)?;
                if let Some(min) = min.filter(|&min| number < min) {
                    return Some(format!("must be greater than or equal to {min}"));
                }
                if let Some(max) = max.filter(|&max| number > max) {
                    return Some(format!("must be less than or equal to {max}"));
                }
                None
            }
            Validator::OneOf(choices) => {
                let text = value.as_scalar().map(Scalar::to_string).unwrap_or_default();
                if choices.iter().any(|c| *c == text) {
                    None
                } else {
                    Some(format!("must be one of {}", choices.join(", ")))
                }
            }
        }
    }
}

/// Numeric reading of a scalar, accepting numeric strings
pub(crate) fn numeric(scalar: &Scalar) -> Option<f64> {
    match scalar {
        Scalar::Int(i) => Some(*i as f64),
        Scalar::Float(x) => Some(*x),
        Scalar::Str(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url() {
        assert_eq!(Validator::Url.check(&Value::from(3)), Some("must be a url".into()));
        assert_eq!(Validator::Url.check(&Value::from("http://www.com")), None);
        assert!(Validator::Url.check(&Value::from("mailto:x@y.z")).is_some());
    }

    #[test]
    fn test_length() {
        let v = Validator::length(Some(2), Some(4));
        assert!(v.check(&Value::from("a")).is_some());
        assert_eq!(v.check(&Value::from("abc")), None);
        assert!(v.check(&Value::from("abcde")).is_some());
        assert!(v.check(&Value::Sequence(vec![Value::from(1)])).is_some());
    }

    #[test]
    fn test_range() {
        let v = Validator::range(Some(0.0), Some(150.0));
        assert_eq!(v.check(&Value::from(133)), None);
        assert_eq!(v.check(&Value::from("24")), None);
        assert_eq!(
            v.check(&Value::from(200)),
            Some("must be less than or equal to 150".into())
        );
    }

    #[test]
    fn test_one_of() {
        let v = Validator::one_of(["red", "green"]);
        assert_eq!(v.check(&Value::from("red")), None);
        assert_eq!(v.check(&Value::from("blue")), Some("must be one of red, green".into()));
    }
}
