//! HTML Serialization
//!
//! Serializes arena DOM nodes back to HTML strings.
//!
//! - Text and attribute escaping
//! - Void elements written without end tags
//! - Raw text elements (`script`, `style`) written unescaped

use pepper_dom::{Document, DomTree, NodeData, NodeId};

/// HTML serializer
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSerializer;

/// Void elements (no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Attributes written as `name=""` even when empty
const VALUE_ATTRIBUTES: &[&str] = &["value"];

impl HtmlSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a whole document
    pub fn serialize_document(&self, document: &Document) -> String {
        let tree = document.tree();
        self.serialize_inner(tree, tree.root())
    }

    /// Serialize innerHTML of a node (children only)
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_children(tree, node_id, &mut output);
        output
    }

    /// Serialize outerHTML of a node (including the node itself)
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_node(tree, node_id, &mut output);
        output
    }

    fn serialize_node(&self, tree: &DomTree, node_id: NodeId, output: &mut String) {
        let Some(node) = tree.get(node_id) else {
            return;
        };

        match &node.data {
            NodeData::Document => {
                self.serialize_children(tree, node_id, output);
            }
            NodeData::Element(elem) => {
                let tag = tree.resolve(elem.name);
                output.push('<');
                output.push_str(tag);
                for attr in &elem.attrs {
                    let name = tree.resolve(attr.name);
                    output.push(' ');
                    output.push_str(name);
                    if !attr.value.is_empty() || VALUE_ATTRIBUTES.contains(&name) {
                        output.push_str("=\"");
                        escape_attribute(&attr.value, output);
                        output.push('"');
                    }
                }

                if VOID_ELEMENTS.contains(&tag) {
                    output.push_str(" />");
                    return;
                }
                output.push('>');

                if RAW_TEXT_ELEMENTS.contains(&tag) {
                    for (_, child) in tree.children(node_id) {
                        if let Some(text) = child.as_text() {
                            output.push_str(text);
                        }
                    }
                } else {
                    self.serialize_children(tree, node_id, output);
                }

                output.push_str("</");
                output.push_str(tag);
                output.push('>');
            }
            NodeData::Text(text) => {
                escape_text(&text.content, output);
            }
            NodeData::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
            NodeData::Doctype { name, .. } => {
                output.push_str("<!DOCTYPE ");
                output.push_str(tree.resolve(*name));
                output.push('>');
            }
        }
    }

    fn serialize_children(&self, tree: &DomTree, parent_id: NodeId, output: &mut String) {
        for (child_id, _) in tree.children(parent_id) {
            self.serialize_node(tree, child_id, output);
        }
    }
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// Get innerHTML of an element
pub fn get_inner_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node_id)
}

/// Get outerHTML of an element
pub fn get_outer_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_outer(tree, node_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        let mut output = String::new();
        escape_text("Hello <world> & \"friends\"", &mut output);
        assert_eq!(output, "Hello &lt;world&gt; &amp; \"friends\"");
    }

    #[test]
    fn test_escape_attribute() {
        let mut output = String::new();
        escape_attribute("a \"b\" & <c>", &mut output);
        assert_eq!(output, "a &quot;b&quot; &amp; &lt;c&gt;");
    }

    #[test]
    fn test_serialize_void_and_empty_value() {
        let mut tree = DomTree::new();
        let div = tree.create_element_with_attrs("div", &[("class", "field")]);
        let input = tree.create_element_with_attrs("input", &[("name", "urls"), ("value", ""), ("required", "")]);
        tree.append_child(tree.root(), div);
        tree.append_child(div, input);

        assert_eq!(
            get_outer_html(&tree, div),
            r#"<div class="field"><input name="urls" value="" required /></div>"#
        );
    }

    #[test]
    fn test_serialize_text_and_comment() {
        let mut tree = DomTree::new();
        let p = tree.create_element("p");
        let text = tree.create_text("3 < 4");
        let comment = tree.create_comment("note");
        tree.append_child(tree.root(), p);
        tree.append_child(p, text);
        tree.append_child(p, comment);

        assert_eq!(get_inner_html(&tree, p), "3 &lt; 4<!--note-->");
    }
}
