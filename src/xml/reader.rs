//! Parse XML text into an [`XmlTree`].
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::common::xml::{resolve_entity, unescape_xml};
use crate::common::{Error, Result};
use crate::xml::node::{NodeId, XmlTree};

/// Parse an XML document into a tree.
///
/// Only element structure, attributes and character content survive;
/// comments and processing instructions are dropped. Whitespace-only
/// text is kept only inside `t` elements, where leading and trailing
/// spaces are significant.
///
/// # Examples
///
/// ```rust
/// use quince::xml::parse;
///
/// let tree = parse("<p:sp><p:txBody><a:t>hi</a:t></p:txBody></p:sp>").unwrap();
/// let body = tree.child(tree.root(), "txBody").unwrap();
/// let t = tree.child(body, "t").unwrap();
/// assert_eq!(tree.text(t), "hi");
/// ```
pub fn parse(xml: &str) -> Result<XmlTree> {
    let mut reader = Reader::from_str(xml);
    let mut tree: Option<XmlTree> = None;
    let mut stack: Vec<NodeId> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let id = open_element(&mut tree, stack.last().copied(), &e)?;
                stack.push(id);
            },
            Ok(Event::Empty(e)) => {
                open_element(&mut tree, stack.last().copied(), &e)?;
            },
            Ok(Event::End(_)) => {
                stack.pop();
            },
            Ok(Event::Text(e)) => {
                if let (Some(tree), Some(&top)) = (tree.as_mut(), stack.last()) {
                    let text = std::str::from_utf8(e.as_ref())
                        .map_err(|e| Error::Xml(e.to_string()))?;
                    if !text.trim().is_empty() || tree.local_tag(top) == "t" {
                        let mut combined = tree.text(top).to_string();
                        combined.push_str(text);
                        tree.set_text(top, combined);
                    }
                }
            },
            // Entity references arrive as their own events, split out
            // of the surrounding text.
            Ok(Event::GeneralRef(e)) => {
                if let (Some(tree), Some(&top)) = (tree.as_mut(), stack.last()) {
                    let body = e.decode().map_err(|e| Error::Xml(e.to_string()))?;
                    let mut combined = tree.text(top).to_string();
                    match resolve_entity(&body) {
                        Some(ch) => combined.push(ch),
                        // Unknown entities survive literally.
                        None => {
                            combined.push('&');
                            combined.push_str(&body);
                            combined.push(';');
                        },
                    }
                    tree.set_text(top, combined);
                }
            },
            Ok(Event::CData(e)) => {
                if let (Some(tree), Some(&top)) = (tree.as_mut(), stack.last()) {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    let mut combined = tree.text(top).to_string();
                    combined.push_str(&text);
                    tree.set_text(top, combined);
                }
            },
            Ok(Event::Eof) => break,
            Ok(_) => {},
            Err(e) => return Err(Error::Xml(e.to_string())),
        }
    }

    tree.ok_or_else(|| Error::InvalidFormat("document has no root element".to_string()))
}

/// Create the element for a `Start`/`Empty` event, either as the tree
/// root or as a child of the innermost open element.
fn open_element(
    tree: &mut Option<XmlTree>,
    parent: Option<NodeId>,
    event: &BytesStart<'_>,
) -> Result<NodeId> {
    let tag = String::from_utf8_lossy(event.name().as_ref()).into_owned();
    let id = match (tree.as_mut(), parent) {
        (Some(tree), Some(parent)) => tree.append_child(parent, tag),
        (Some(_), None) => {
            return Err(Error::InvalidFormat(
                "multiple root elements in document".to_string(),
            ));
        },
        (None, _) => {
            *tree = Some(XmlTree::new(tag));
            tree.as_ref().map(|t| t.root()).unwrap_or(NodeId(0))
        },
    };

    if let Some(tree) = tree.as_mut() {
        for attr in event.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = unescape_xml(&String::from_utf8_lossy(&attr.value));
            tree.set_attribute(id, key, value);
        }
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_attribute_order_and_values() {
        let tree = parse(r#"<a:bodyPr anchor="ctr" wrap="none" lIns="91440"/>"#).unwrap();
        let root = tree.root();
        assert_eq!(tree.attribute(root, "anchor"), Some("ctr"));
        assert_eq!(tree.attribute(root, "wrap"), Some("none"));
        assert_eq!(tree.attribute(root, "lIns"), Some("91440"));
    }

    #[test]
    fn test_parse_keeps_significant_text_whitespace() {
        let tree = parse("<a:r><a:t> text</a:t></a:r>").unwrap();
        let t = tree.child(tree.root(), "t").unwrap();
        assert_eq!(tree.text(t), " text");
    }

    #[test]
    fn test_parse_drops_indentation_text() {
        let tree = parse("<p:sp>\n  <p:txBody>\n  </p:txBody>\n</p:sp>").unwrap();
        assert_eq!(tree.text(tree.root()), "");
    }

    #[test]
    fn test_parse_unescapes_entities() {
        let tree = parse("<a:t>a &amp; b</a:t>").unwrap();
        assert_eq!(tree.text(tree.root()), "a & b");
    }

    #[test]
    fn test_parse_resolves_all_predefined_entities() {
        let tree = parse("<a:t>&lt;&gt;&quot;&apos;&amp;</a:t>").unwrap();
        assert_eq!(tree.text(tree.root()), "<>\"'&");
    }

    #[test]
    fn test_parse_resolves_character_references() {
        let tree = parse("<a:t>snow &#x2603; and &#9731;</a:t>").unwrap();
        assert_eq!(tree.text(tree.root()), "snow \u{2603} and \u{2603}");
    }

    #[test]
    fn test_parse_unescapes_attribute_values() {
        let tree = parse(r#"<p:cNvPr name="Tom &amp; Jerry"/>"#).unwrap();
        assert_eq!(tree.attribute(tree.root(), "name"), Some("Tom & Jerry"));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(parse("").is_err());
    }
}
