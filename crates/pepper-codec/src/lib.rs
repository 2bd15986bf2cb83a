//! pepper codec
//!
//! The nested [`Value`] model shared by the schema and form crates, and the
//! flattened field encoding used to submit nested data through a plain
//! HTML form: groups are bracketed by hidden `__start__` / `__end__` fields.

mod codec;
mod token;
mod value;

pub use codec::{parse, parse_pairs, serialize, MAX_DEPTH};
pub use token::{end_key, parse_start_value, start_value, to_pairs, tokenize, Kind, Token, END, START};
pub use value::{Mapping, Scalar, Value};

/// Codec error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Unknown group kind: {0:?}")]
    UnknownKind(String),

    #[error("End marker {0:?} outside of any group")]
    UnexpectedEnd(String),

    #[error("End marker {found:?} closes group {expected:?}")]
    MismatchedEnd { expected: String, found: String },

    #[error("Group {0:?} is never closed")]
    Unterminated(String),

    #[error("Groups nested deeper than {0} levels")]
    TooDeep(usize),
}
