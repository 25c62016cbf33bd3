//! The text portion handle.
use std::cell::RefCell;
use std::rc::Rc;

use crate::presentation::prs::DocumentInner;
use crate::text::font::Font;
use crate::xml::NodeId;

/// A run of equally-formatted text (`a:r`) within a paragraph.
#[derive(Clone)]
pub struct Portion {
    pub(crate) doc: Rc<RefCell<DocumentInner>>,
    pub(crate) node: NodeId,
}

impl Portion {
    /// The portion's text.
    pub fn text(&self) -> String {
        let inner = self.doc.borrow();
        let tree = &inner.tree;
        tree.child(self.node, "t")
            .map(|t| tree.text(t).to_string())
            .unwrap_or_default()
    }

    /// Replace the portion's text in place, keeping its formatting.
    pub fn set_text(&self, text: &str) {
        let mut inner = self.doc.borrow_mut();
        let tree = &mut inner.tree;
        let t = match tree.child(self.node, "t") {
            Some(t) => t,
            None => tree.append_child(self.node, "a:t"),
        };
        tree.set_text(t, text);
        inner.touch();
    }

    /// The portion's font.
    pub fn font(&self) -> Font {
        Font {
            doc: Rc::clone(&self.doc),
            node: self.node,
        }
    }

    /// A stable indexed locator for the underlying run element.
    pub fn sdk_xpath(&self) -> String {
        let inner = self.doc.borrow();
        inner.tree.node_path(self.node)
    }
}
