//! Token stream <-> nested value

use crate::{CodecError, Kind, Mapping, Token, Value};

/// Deepest group nesting `parse` accepts
pub const MAX_DEPTH: usize = 64;

/// Decode a token stream into a mapping of top-level fields
pub fn parse(tokens: &[Token]) -> Result<Value, CodecError> {
    let mut iter = tokens.iter();
    let children = read_group(&mut iter, None, 0)?;
    let value = build(Kind::Mapping, children).unwrap_or_else(Value::mapping);
    tracing::trace!("decoded {} tokens", tokens.len());
    Ok(value)
}

/// Decode raw `(key, value)` pairs
pub fn parse_pairs<I, K, V>(pairs: I) -> Result<Value, CodecError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    parse(&crate::tokenize(pairs)?)
}

/// Read members until the matching end marker (or end of input at top level)
fn read_group<'a, I>(
    iter: &mut I,
    group: Option<&str>,
    depth: usize,
) -> Result<Vec<(String, Value)>, CodecError>
where
    I: Iterator<Item = &'a Token>,
{
    let mut children = Vec::new();
    while let Some(token) = iter.next() {
        match token {
            Token::Field { name, value } => {
                children.push((name.clone(), Value::from(value.as_str())));
            }
            Token::Start { kind, name } => {
                if depth >= MAX_DEPTH {
                    return Err(CodecError::TooDeep(MAX_DEPTH));
                }
                let members = read_group(iter, Some(name), depth + 1)?;
                if let Some(value) = build(*kind, members) {
                    children.push((name.clone(), value));
                }
            }
            Token::End { name } => {
                let Some(group) = group else {
                    return Err(CodecError::UnexpectedEnd(name.clone().unwrap_or_default()));
                };
                if let Some(name) = name {
                    if name != group {
                        return Err(CodecError::MismatchedEnd {
                            expected: group.to_string(),
                            found: name.clone(),
                        });
                    }
                }
                return Ok(children);
            }
        }
    }
    match group {
        Some(group) => Err(CodecError::Unterminated(group.to_string())),
        None => Ok(children),
    }
}

fn build(kind: Kind, members: Vec<(String, Value)>) -> Option<Value> {
    match kind {
        Kind::Sequence => Some(Value::Sequence(members.into_iter().map(|(_, v)| v).collect())),
        Kind::Mapping => {
            let mut mapping = Mapping::with_capacity(members.len());
            for (name, value) in members {
                mapping.insert(name, value);
            }
            Some(Value::Mapping(mapping))
        }
        Kind::Rename => Some(members.into_iter().next().map(|(_, v)| v).unwrap_or_default()),
        Kind::Ignore => None,
    }
}

/// Encode a value as tokens; a top-level mapping is written as its members
pub fn serialize(value: &Value) -> Vec<Token> {
    let mut tokens = Vec::new();
    match value {
        Value::Mapping(mapping) => {
            for (name, member) in mapping {
                emit(name, member, &mut tokens);
            }
        }
        other => emit("", other, &mut tokens),
    }
    tokens
}

fn emit(name: &str, value: &Value, tokens: &mut Vec<Token>) {
    match value {
        Value::Scalar(scalar) => tokens.push(Token::field(name, scalar.to_string())),
        Value::Sequence(items) => {
            tokens.push(Token::start(Kind::Sequence, name));
            for item in items {
                emit(name, item, tokens);
            }
            tokens.push(Token::end(name));
        }
        Value::Mapping(mapping) => {
            tokens.push(Token::start(Kind::Mapping, name));
            for (key, member) in mapping {
                emit(key, member, tokens);
            }
            tokens.push(Token::end(name));
        }
    }
}
