//! The text box handle.
use std::cell::RefCell;
use std::rc::Rc;

use crate::chain::{body_property_nodes, resolve_first};
use crate::common::Length;
use crate::markdown;
use crate::presentation::prs::DocumentInner;
use crate::text::paragraph::Paragraph;
use crate::text::types::{AutofitType, TextDirection, TextVerticalAlignment};
use crate::xml::{NodeId, XmlTree};

/// Default horizontal body inset (0.1 inch).
const DEFAULT_HORIZONTAL_INSET: i64 = 91_440;
/// Default vertical body inset (0.05 inch).
const DEFAULT_VERTICAL_INSET: i64 = 45_720;

/// The `bodyPr` of a text body, created on first write.
///
/// `bodyPr` leads the body's children, so creation inserts at the
/// front.
pub(crate) fn ensure_body_pr(tree: &mut XmlTree, txbody: NodeId) -> NodeId {
    match tree.child(txbody, "bodyPr") {
        Some(body_pr) => body_pr,
        None => tree.insert_child(txbody, 0, "a:bodyPr"),
    }
}

/// The text body (`p:txBody`) of a shape.
///
/// Box-scoped formatting reads fall back from the box's own `bodyPr`
/// to the correlated layout and master placeholders; writes always go
/// to the box's own `bodyPr`, leaving ancestors untouched.
///
/// # Examples
///
/// ```rust
/// use quince::presentation::Presentation;
///
/// let xml = r#"<p:presentation><p:sld id="s1"><p:spTree><p:sp>
///     <p:nvSpPr><p:cNvPr id="2" name="Title 1"/></p:nvSpPr>
///     <p:txBody><a:bodyPr/><a:p><a:r><a:t>Hello</a:t></a:r></a:p></p:txBody>
/// </p:sp></p:spTree></p:sld></p:presentation>"#;
/// let prs = Presentation::from_xml(xml).unwrap();
/// let shape = prs.slides().remove(0).shape("Title 1").unwrap();
/// assert_eq!(shape.text_box().unwrap().text(), "Hello");
/// ```
#[derive(Clone)]
pub struct TextBox {
    pub(crate) doc: Rc<RefCell<DocumentInner>>,
    pub(crate) node: NodeId,
}

impl TextBox {
    /// The paragraphs of the box, in document order.
    pub fn paragraphs(&self) -> Vec<Paragraph> {
        let inner = self.doc.borrow();
        inner
            .tree
            .children(self.node, "p")
            .map(|node| Paragraph {
                doc: Rc::clone(&self.doc),
                node,
            })
            .collect()
    }

    /// The plain text of the box, paragraphs joined with newlines.
    pub fn text(&self) -> String {
        let paragraphs = self.paragraphs();
        let mut out = String::new();
        for (i, paragraph) in paragraphs.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&paragraph.text());
        }
        out
    }

    /// Replace the box's content with a single plain-text paragraph.
    ///
    /// `bodyPr` and `lstStyle` are preserved; only the paragraphs are
    /// rewritten.
    pub fn set_text(&self, text: &str) {
        let mut inner = self.doc.borrow_mut();
        let tree = &mut inner.tree;
        tree.remove_children(self.node, "p");
        let paragraph = tree.append_child(self.node, "a:p");
        let run = tree.append_child(paragraph, "a:r");
        let t = tree.append_child(run, "a:t");
        tree.set_text(t, text);
        inner.touch();
    }

    /// Replace the box's content from Markdown-subset input.
    ///
    /// Each input line becomes a paragraph; bold and italic spans
    /// become separate runs carrying explicit `b`/`i` flags.
    pub fn set_markdown_text(&self, input: &str) {
        let paragraphs = markdown::parse(input);
        let mut inner = self.doc.borrow_mut();
        let tree = &mut inner.tree;
        tree.remove_children(self.node, "p");
        for runs in paragraphs {
            let paragraph = tree.append_child(self.node, "a:p");
            for md_run in runs {
                let run = tree.append_child(paragraph, "a:r");
                if md_run.bold || md_run.italic {
                    let rpr = tree.append_child(run, "a:rPr");
                    if md_run.bold {
                        tree.set_attribute(rpr, "b", "1");
                    }
                    if md_run.italic {
                        tree.set_attribute(rpr, "i", "1");
                    }
                }
                let t = tree.append_child(run, "a:t");
                tree.set_text(t, md_run.text);
            }
        }
        inner.touch();
    }

    /// Resolve a `bodyPr`-scoped value through the inheritance chain.
    fn resolve_body<T>(&self, read: impl Fn(&XmlTree, NodeId) -> Option<T>) -> Option<T> {
        let inner = self.doc.borrow();
        let tree = &inner.tree;
        let nodes = body_property_nodes(tree, self.node);
        resolve_first(nodes.iter().copied(), |&n| read(tree, n))
    }

    /// Write an attribute on the box's own `bodyPr`.
    fn write_body_attr(&self, name: &str, value: String) {
        let mut inner = self.doc.borrow_mut();
        let body_pr = ensure_body_pr(&mut inner.tree, self.node);
        inner.tree.set_attribute(body_pr, name, value);
        inner.touch();
    }

    /// Vertical anchoring of the text, defaulting to top.
    pub fn vertical_alignment(&self) -> TextVerticalAlignment {
        self.resolve_body(|tree, n| {
            tree.attribute(n, "anchor")
                .and_then(TextVerticalAlignment::from_attr)
        })
        .unwrap_or_default()
    }

    /// Set the vertical anchoring on this box.
    pub fn set_vertical_alignment(&self, alignment: TextVerticalAlignment) {
        self.write_body_attr("anchor", alignment.attr_value().to_string());
    }

    /// The box's autofit behavior, defaulting to none.
    pub fn autofit_type(&self) -> AutofitType {
        self.resolve_body(|tree, n| {
            tree.all_children(n)
                .iter()
                .find_map(|&c| AutofitType::from_element(tree.local_tag(c)))
        })
        .unwrap_or_default()
    }

    /// Set the autofit behavior on this box.
    pub fn set_autofit_type(&self, autofit: AutofitType) {
        let mut inner = self.doc.borrow_mut();
        let body_pr = ensure_body_pr(&mut inner.tree, self.node);
        inner.tree.remove_children(body_pr, "normAutofit");
        inner.tree.remove_children(body_pr, "spAutoFit");
        if let Some(element) = autofit.element_name() {
            inner.tree.append_child(body_pr, element);
        }
        inner.touch();
    }

    /// The text flow direction, defaulting to horizontal.
    pub fn text_direction(&self) -> TextDirection {
        self.resolve_body(|tree, n| tree.attribute(n, "vert").and_then(TextDirection::from_attr))
            .unwrap_or_default()
    }

    /// Set the text flow direction on this box.
    pub fn set_text_direction(&self, direction: TextDirection) {
        self.write_body_attr("vert", direction.attr_value().to_string());
    }

    /// Whether text wraps at the box edge. Read-only; defaults to true.
    pub fn text_wrapped(&self) -> bool {
        self.resolve_body(|tree, n| tree.attribute(n, "wrap").map(|v| v != "none"))
            .unwrap_or(true)
    }

    /// Resolve one inset attribute, falling back to the given default.
    fn inset(&self, attr: &str, default_emus: i64) -> Length {
        let emus = self
            .resolve_body(|tree, n| tree.attribute(n, attr).and_then(|v| v.parse().ok()))
            .unwrap_or(default_emus);
        Length::from_emus(emus)
    }

    /// Left inner margin.
    pub fn left_margin(&self) -> Length {
        self.inset("lIns", DEFAULT_HORIZONTAL_INSET)
    }

    /// Right inner margin.
    pub fn right_margin(&self) -> Length {
        self.inset("rIns", DEFAULT_HORIZONTAL_INSET)
    }

    /// Top inner margin.
    pub fn top_margin(&self) -> Length {
        self.inset("tIns", DEFAULT_VERTICAL_INSET)
    }

    /// Bottom inner margin.
    pub fn bottom_margin(&self) -> Length {
        self.inset("bIns", DEFAULT_VERTICAL_INSET)
    }

    /// Set the left inner margin on this box.
    pub fn set_left_margin(&self, margin: Length) {
        self.write_body_attr("lIns", margin.emus().to_string());
    }

    /// Set the right inner margin on this box.
    pub fn set_right_margin(&self, margin: Length) {
        self.write_body_attr("rIns", margin.emus().to_string());
    }

    /// Set the top inner margin on this box.
    pub fn set_top_margin(&self, margin: Length) {
        self.write_body_attr("tIns", margin.emus().to_string());
    }

    /// Set the bottom inner margin on this box.
    pub fn set_bottom_margin(&self, margin: Length) {
        self.write_body_attr("bIns", margin.emus().to_string());
    }

    /// A stable indexed locator for the underlying `txBody` element.
    pub fn sdk_xpath(&self) -> String {
        let inner = self.doc.borrow();
        inner.tree.node_path(self.node)
    }
}
