//! The shape handle.
use std::cell::RefCell;
use std::rc::Rc;

use crate::chain::{PlaceholderKey, placeholder_key};
use crate::presentation::prs::DocumentInner;
use crate::text::TextBox;
use crate::xml::NodeId;

/// A shape (`p:sp`) on a slide, layout or master.
#[derive(Clone)]
pub struct Shape {
    pub(crate) doc: Rc<RefCell<DocumentInner>>,
    pub(crate) node: NodeId,
}

impl Shape {
    /// The `p:cNvPr` element carrying the shape's identity.
    fn c_nv_pr(&self) -> Option<NodeId> {
        let inner = self.doc.borrow();
        let tree = &inner.tree;
        let nv_sp_pr = tree.child(self.node, "nvSpPr")?;
        tree.child(nv_sp_pr, "cNvPr")
    }

    /// The shape's display name.
    pub fn name(&self) -> Option<String> {
        let c_nv_pr = self.c_nv_pr()?;
        let inner = self.doc.borrow();
        inner.tree.attribute(c_nv_pr, "name").map(str::to_string)
    }

    /// The shape's numeric id.
    pub fn id(&self) -> Option<u32> {
        let c_nv_pr = self.c_nv_pr()?;
        let inner = self.doc.borrow();
        inner.tree.attribute(c_nv_pr, "id")?.parse().ok()
    }

    /// The placeholder key of the shape, if it is a placeholder.
    pub fn placeholder(&self) -> Option<PlaceholderKey> {
        let inner = self.doc.borrow();
        placeholder_key(&inner.tree, self.node)
    }

    /// Whether the shape participates in placeholder inheritance.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder().is_some()
    }

    /// The shape's text body, if it has one.
    pub fn text_box(&self) -> Option<TextBox> {
        let inner = self.doc.borrow();
        let node = inner.tree.child(self.node, "txBody")?;
        Some(TextBox {
            doc: Rc::clone(&self.doc),
            node,
        })
    }
}
