//! pepper HTML
//!
//! HTML5 parsing built on html5ever, converted into the pepper arena DOM,
//! plus the serializer that turns a rendered form back into markup.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use pepper_dom::{Document, DomTree, Node, NodeId};
pub use serializer::{get_inner_html, get_outer_html, HtmlSerializer};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Serialize a whole document
pub fn serialize(document: &Document) -> String {
    HtmlSerializer::new().serialize_document(document)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}
