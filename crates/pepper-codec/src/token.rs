//! Marker tokens
//!
//! A submitted form is an ordered list of `(key, value)` pairs. Groups are
//! delimited by a `__start__` field whose value is `<kind>:<name>` and an
//! `__end__` (or `__end__:<name>`) field.

use std::fmt;
use std::str::FromStr;

use crate::CodecError;

/// Key of a start marker field
pub const START: &str = "__start__";
/// Key (or key prefix) of an end marker field
pub const END: &str = "__end__";

/// Group kind carried by a start marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Ordered list of values; member names are ignored
    Sequence,
    /// Named members
    Mapping,
    /// The first member value, stored under the group name
    Rename,
    /// Dropped entirely
    Ignore,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
            Kind::Rename => "rename",
            Kind::Ignore => "ignore",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sequence" => Ok(Kind::Sequence),
            "mapping" => Ok(Kind::Mapping),
            "rename" => Ok(Kind::Rename),
            "ignore" => Ok(Kind::Ignore),
            other => Err(CodecError::UnknownKind(other.to_string())),
        }
    }
}

/// One element of the flattened encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Start { kind: Kind, name: String },
    End { name: Option<String> },
    Field { name: String, value: String },
}

impl Token {
    pub fn start(kind: Kind, name: impl Into<String>) -> Self {
        Token::Start { kind, name: name.into() }
    }

    pub fn end(name: impl Into<String>) -> Self {
        Token::End { name: Some(name.into()) }
    }

    pub fn field(name: impl Into<String>, value: impl Into<String>) -> Self {
        Token::Field { name: name.into(), value: value.into() }
    }

    /// `(key, value)` pair as submitted by a browser
    pub fn to_pair(&self) -> (String, String) {
        match self {
            Token::Start { kind, name } => (START.to_string(), start_value(*kind, name)),
            Token::End { name: Some(name) } => (end_key(name), String::new()),
            Token::End { name: None } => (END.to_string(), String::new()),
            Token::Field { name, value } => (name.clone(), value.clone()),
        }
    }
}

/// Value of a start marker field: `<kind>:<name>`
pub fn start_value(kind: Kind, name: &str) -> String {
    format!("{kind}:{name}")
}

/// Key of an end marker field: `__end__:<name>`
pub fn end_key(name: &str) -> String {
    format!("{END}:{name}")
}

/// Decode the value of a start marker.
///
/// `kind:name` is the canonical order; `name:kind` is accepted when only
/// the trailing part names a kind. A bare kind opens an unnamed group.
pub fn parse_start_value(value: &str) -> Result<(Kind, String), CodecError> {
    let Some((head, tail)) = value.split_once(':') else {
        return Ok((value.parse()?, String::new()));
    };
    if let Ok(kind) = head.parse::<Kind>() {
        return Ok((kind, tail.trim().to_string()));
    }
    if let Some((name, kind)) = value.rsplit_once(':') {
        if let Ok(kind) = kind.parse::<Kind>() {
            return Ok((kind, name.trim().to_string()));
        }
    }
    Err(CodecError::UnknownKind(head.trim().to_string()))
}

/// Turn submitted `(key, value)` pairs into tokens
pub fn tokenize<I, K, V>(pairs: I) -> Result<Vec<Token>, CodecError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(key, value)| {
            let (key, value) = (key.as_ref(), value.as_ref());
            if key == START {
                let (kind, name) = parse_start_value(value)?;
                Ok(Token::Start { kind, name })
            } else if key == END {
                Ok(Token::End { name: None })
            } else if let Some(name) = key.strip_prefix(END).and_then(|k| k.strip_prefix(':')) {
                Ok(Token::End { name: Some(name.to_string()) })
            } else {
                Ok(Token::field(key, value))
            }
        })
        .collect()
}

/// Inverse of [`tokenize`]
pub fn to_pairs(tokens: &[Token]) -> Vec<(String, String)> {
    tokens.iter().map(Token::to_pair).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_value_orders() {
        assert_eq!(parse_start_value("sequence:urls").unwrap(), (Kind::Sequence, "urls".into()));
        assert_eq!(parse_start_value("people:mapping").unwrap(), (Kind::Mapping, "people".into()));
        assert_eq!(parse_start_value("ignore").unwrap(), (Kind::Ignore, String::new()));
        assert!(matches!(parse_start_value("list:things"), Err(CodecError::UnknownKind(_))));
    }

    #[test]
    fn test_tokenize_markers() {
        let tokens = tokenize([
            ("__start__", "sequence:urls"),
            ("urls", "http://a"),
            ("__end__:urls", ""),
            ("__end__", ""),
        ])
        .unwrap();

        assert_eq!(tokens[0], Token::start(Kind::Sequence, "urls"));
        assert_eq!(tokens[1], Token::field("urls", "http://a"));
        assert_eq!(tokens[2], Token::end("urls"));
        assert_eq!(tokens[3], Token::End { name: None });
    }

    #[test]
    fn test_pairs_roundtrip() {
        let tokens = vec![
            Token::start(Kind::Mapping, "person"),
            Token::field("name", "sue"),
            Token::end("person"),
        ];
        assert_eq!(tokenize(to_pairs(&tokens)).unwrap(), tokens);
    }

    #[test]
    fn test_field_prefixed_like_end_is_a_field() {
        let tokens = tokenize([("__end__x", "1")]).unwrap();
        assert_eq!(tokens[0], Token::field("__end__x", "1"));
    }
}
