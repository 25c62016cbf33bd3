//! Handles for slides, layouts, masters and the theme.
use std::cell::RefCell;
use std::rc::Rc;

use crate::chain::{layout_of, master_of};
use crate::presentation::prs::DocumentInner;
use crate::presentation::shape::Shape;
use crate::scheme::ColorScheme;
use crate::xml::NodeId;

/// Collect the `p:sp` shapes of a part's `spTree`.
fn shapes_of(doc: &Rc<RefCell<DocumentInner>>, part: NodeId) -> Vec<Shape> {
    let inner = doc.borrow();
    let tree = &inner.tree;
    let Some(sp_tree) = tree.child(part, "spTree") else {
        return Vec::new();
    };
    tree.children(sp_tree, "sp")
        .map(|node| Shape {
            doc: Rc::clone(doc),
            node,
        })
        .collect()
}

/// A slide of the presentation.
#[derive(Clone)]
pub struct Slide {
    pub(crate) doc: Rc<RefCell<DocumentInner>>,
    pub(crate) node: NodeId,
}

impl Slide {
    /// The slide's `id` attribute.
    pub fn id(&self) -> Option<String> {
        let inner = self.doc.borrow();
        inner.tree.attribute(self.node, "id").map(str::to_string)
    }

    /// The shapes on the slide, in document order.
    pub fn shapes(&self) -> Vec<Shape> {
        shapes_of(&self.doc, self.node)
    }

    /// Find a shape by its name.
    pub fn shape(&self, name: &str) -> Option<Shape> {
        self.shapes()
            .into_iter()
            .find(|s| s.name().as_deref() == Some(name))
    }

    /// The layout this slide references, if resolvable.
    pub fn layout(&self) -> Option<SlideLayout> {
        let inner = self.doc.borrow();
        let node = layout_of(&inner.tree, self.node)?;
        Some(SlideLayout {
            doc: Rc::clone(&self.doc),
            node,
        })
    }
}

/// A slide layout.
#[derive(Clone)]
pub struct SlideLayout {
    pub(crate) doc: Rc<RefCell<DocumentInner>>,
    pub(crate) node: NodeId,
}

impl SlideLayout {
    /// The layout's `id` attribute.
    pub fn id(&self) -> Option<String> {
        let inner = self.doc.borrow();
        inner.tree.attribute(self.node, "id").map(str::to_string)
    }

    /// The shapes on the layout.
    pub fn shapes(&self) -> Vec<Shape> {
        shapes_of(&self.doc, self.node)
    }

    /// The master this layout references, if resolvable.
    pub fn master(&self) -> Option<SlideMaster> {
        let inner = self.doc.borrow();
        let node = master_of(&inner.tree, self.node)?;
        Some(SlideMaster {
            doc: Rc::clone(&self.doc),
            node,
        })
    }
}

/// A slide master.
#[derive(Clone)]
pub struct SlideMaster {
    pub(crate) doc: Rc<RefCell<DocumentInner>>,
    pub(crate) node: NodeId,
}

impl SlideMaster {
    /// The master's `id` attribute.
    pub fn id(&self) -> Option<String> {
        let inner = self.doc.borrow();
        inner.tree.attribute(self.node, "id").map(str::to_string)
    }

    /// The shapes on the master.
    pub fn shapes(&self) -> Vec<Shape> {
        shapes_of(&self.doc, self.node)
    }
}

/// The document theme.
#[derive(Clone)]
pub struct Theme {
    pub(crate) doc: Rc<RefCell<DocumentInner>>,
    pub(crate) node: NodeId,
}

impl Theme {
    /// The theme's color scheme. Slots the markup does not define stay
    /// unset.
    pub fn color_scheme(&self) -> ColorScheme {
        let inner = self.doc.borrow();
        let tree = &inner.tree;
        // clrScheme sits either directly under the theme element or
        // inside a:themeElements.
        tree.child(self.node, "clrScheme")
            .or_else(|| {
                let elements = tree.child(self.node, "themeElements")?;
                tree.child(elements, "clrScheme")
            })
            .map(|n| ColorScheme::from_node(tree, n))
            .unwrap_or_default()
    }
}
