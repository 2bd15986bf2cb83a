//! Parse/serialize tests for pepper-html
//!
//! Form templates go through parse -> mutate -> serialize -> parse again in
//! every render test, so these check that markup survives the trip.

use pepper_html::{parse, serialize, HtmlParser, HtmlSerializer};

const FORM: &str = r#"
<html>
  <body>
    <form action="/people" method="post">
      <input type="hidden" name="schema" value="myschema">
      <fieldset class="people">
        <div class="field">
          <label>Name</label>
          <input type="text" name="name">
          <div class="error-message"></div>
        </div>
        <div class="field">
          <textarea name="bio"></textarea>
          <div class="error-message"></div>
        </div>
      </fieldset>
    </form>
  </body>
</html>
"#;

#[test]
fn test_parse_minimal_html() {
    let doc = HtmlParser::new().parse("").unwrap();
    assert!(doc.tree().len() >= 1, "Even empty HTML should have root");
}

#[test]
fn test_parse_form_structure() {
    let doc = parse(FORM).unwrap();
    let tree = doc.tree();

    let fields = tree.elements_by_tag(tree.root(), &["input", "textarea"]);
    assert_eq!(fields.len(), 3);
    assert_eq!(tree.attr(fields[2], "name"), Some("bio"));

    let fieldsets = tree.elements_by_tag_and_class(tree.root(), "fieldset", "people");
    assert_eq!(fieldsets.len(), 1);
    assert_eq!(tree.elements_by_tag_and_class(fieldsets[0], "div", "field").len(), 2);
}

#[test]
fn test_roundtrip_preserves_fields() {
    let doc = parse(FORM).unwrap();
    let html = serialize(&doc);
    let again = parse(&html).unwrap();

    let tree = again.tree();
    let inputs = tree.elements_by_tag(tree.root(), &["input"]);
    assert_eq!(inputs.len(), 2);
    assert_eq!(tree.attr(inputs[0], "value"), Some("myschema"));
    assert_eq!(serialize(&again), html);
}

#[test]
fn test_textarea_content_roundtrip() {
    let mut doc = parse("<form><textarea name=\"bio\"></textarea></form>").unwrap();
    let tree = doc.tree_mut();
    let textarea = tree.elements_by_tag(tree.root(), &["textarea"])[0];
    tree.set_text_content(textarea, "a < b & c");

    let html = serialize(&doc);
    assert!(html.contains("<textarea name=\"bio\">a &lt; b &amp; c</textarea>"));

    let again = parse(&html).unwrap();
    let textarea = again.tree().elements_by_tag(again.tree().root(), &["textarea"])[0];
    assert_eq!(again.tree().text_content(textarea), "a < b & c");
}

#[test]
fn test_attribute_quotes_roundtrip() {
    let mut doc = parse("<input name=\"q\">").unwrap();
    let tree = doc.tree_mut();
    let input = tree.elements_by_tag(tree.root(), &["input"])[0];
    tree.set_attr(input, "value", "say \"hi\"");

    let again = parse(&serialize(&doc)).unwrap();
    let input = again.tree().elements_by_tag(again.tree().root(), &["input"])[0];
    assert_eq!(again.tree().attr(input, "value"), Some("say \"hi\""));
}

#[test]
fn test_doctype_is_kept() {
    let doc = parse("<!DOCTYPE html><p>x</p>").unwrap();
    assert!(HtmlSerializer::new().serialize_document(&doc).starts_with("<!DOCTYPE html>"));
}
