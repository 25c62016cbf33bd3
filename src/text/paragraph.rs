//! The paragraph handle.
use std::cell::RefCell;
use std::rc::Rc;

use crate::chain::{paragraph_level, paragraph_property_nodes, resolve_first};
use crate::presentation::prs::DocumentInner;
use crate::text::portion::Portion;
use crate::text::types::TextAlignment;
use crate::xml::{NodeId, XmlTree};

/// The `pPr` of a paragraph, created on first write (it must lead the
/// paragraph's children).
fn ensure_ppr(tree: &mut XmlTree, paragraph: NodeId) -> NodeId {
    match tree.child(paragraph, "pPr") {
        Some(ppr) => ppr,
        None => tree.insert_child(paragraph, 0, "a:pPr"),
    }
}

/// A paragraph (`a:p`) within a text box.
#[derive(Clone)]
pub struct Paragraph {
    pub(crate) doc: Rc<RefCell<DocumentInner>>,
    pub(crate) node: NodeId,
}

impl Paragraph {
    /// The text portions of the paragraph, in document order.
    pub fn portions(&self) -> Vec<Portion> {
        let inner = self.doc.borrow();
        inner
            .tree
            .children(self.node, "r")
            .map(|node| Portion {
                doc: Rc::clone(&self.doc),
                node,
            })
            .collect()
    }

    /// The concatenated text of the paragraph's portions.
    pub fn text(&self) -> String {
        let inner = self.doc.borrow();
        let tree = &inner.tree;
        let mut out = String::new();
        for run in tree.children(self.node, "r") {
            if let Some(t) = tree.child(run, "t") {
                out.push_str(tree.text(t));
            }
        }
        out
    }

    /// Replace the paragraph's portions with a single plain-text run.
    ///
    /// Paragraph properties (`pPr`) survive the rewrite.
    pub fn set_text(&self, text: &str) {
        let mut inner = self.doc.borrow_mut();
        let tree = &mut inner.tree;
        tree.remove_children(self.node, "r");
        tree.remove_children(self.node, "br");
        let run = tree.append_child(self.node, "a:r");
        let t = tree.append_child(run, "a:t");
        tree.set_text(t, text);
        inner.touch();
    }

    /// Horizontal alignment, resolved through the inheritance chain.
    /// `None` means no level sets it.
    pub fn alignment(&self) -> Option<TextAlignment> {
        let inner = self.doc.borrow();
        let tree = &inner.tree;
        let nodes = paragraph_property_nodes(tree, self.node);
        resolve_first(nodes.iter().copied(), |&n| {
            tree.attribute(n, "algn").and_then(TextAlignment::from_attr)
        })
    }

    /// Set the horizontal alignment on this paragraph.
    pub fn set_alignment(&self, alignment: TextAlignment) {
        let mut inner = self.doc.borrow_mut();
        let ppr = ensure_ppr(&mut inner.tree, self.node);
        inner.tree.set_attribute(ppr, "algn", alignment.attr_value());
        inner.touch();
    }

    /// The paragraph's indent level (0-based).
    pub fn indent_level(&self) -> u8 {
        let inner = self.doc.borrow();
        paragraph_level(&inner.tree, self.node)
    }

    /// Line spacing as a percentage of single spacing (e.g. `150.0`),
    /// chain-resolved. `None` means no level sets it.
    ///
    /// Markup stores the percentage in thousandths inside
    /// `lnSpc/spcPct`.
    pub fn line_spacing(&self) -> Option<f64> {
        let inner = self.doc.borrow();
        let tree = &inner.tree;
        let nodes = paragraph_property_nodes(tree, self.node);
        resolve_first(nodes.iter().copied(), |&n| {
            let spc_pct = tree.child(tree.child(n, "lnSpc")?, "spcPct")?;
            let thousandths: i64 = tree.attribute(spc_pct, "val")?.parse().ok()?;
            Some(thousandths as f64 / 1000.0)
        })
    }

    /// Set the line spacing on this paragraph, as a percentage.
    pub fn set_line_spacing(&self, percent: f64) {
        let mut inner = self.doc.borrow_mut();
        let tree = &mut inner.tree;
        let ppr = ensure_ppr(tree, self.node);
        tree.remove_children(ppr, "lnSpc");
        let ln_spc = tree.insert_child(ppr, 0, "a:lnSpc");
        let spc_pct = tree.append_child(ln_spc, "a:spcPct");
        let thousandths = (percent * 1000.0).round() as i64;
        tree.set_attribute(spc_pct, "val", thousandths.to_string());
        inner.touch();
    }
}
