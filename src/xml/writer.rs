//! Serialize an [`XmlTree`] back to XML text.
use crate::common::xml::escape_xml;
use crate::xml::node::{NodeId, XmlTree};

/// XML declaration emitted ahead of every serialized document.
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Serialize a tree to a compact XML string.
///
/// Output is deterministic: attributes keep their stored order and no
/// indentation is inserted, so `parse(serialize(t))` reproduces `t`
/// node for node.
pub fn serialize(tree: &XmlTree) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(XML_DECL);
    write_node(tree, tree.root(), &mut out);
    out
}

fn write_node(tree: &XmlTree, id: NodeId, out: &mut String) {
    let tag = tree.tag(id);
    out.push('<');
    out.push_str(tag);
    for (name, value) in tree.attributes(id) {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_xml(value));
        out.push('"');
    }

    let text = tree.text(id);
    let children = tree.all_children(id);
    if text.is_empty() && children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    if !text.is_empty() {
        out.push_str(&escape_xml(text));
    }
    for &child in children {
        write_node(tree, child, out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
