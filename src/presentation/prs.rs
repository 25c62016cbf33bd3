//! The presentation document and its persistence boundary.
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::common::{Error, Result};
use crate::presentation::slide::{Slide, SlideLayout, SlideMaster, Theme};
use crate::xml::{XmlTree, parse, serialize};

/// Shared document state behind every handle.
///
/// One tree owns the entire presentation; handles address into it by
/// node id. The model is single-threaded, so interior mutability is a
/// plain `RefCell` with no locking.
#[derive(Debug)]
pub(crate) struct DocumentInner {
    pub(crate) tree: XmlTree,
    pub(crate) modified: bool,
}

impl DocumentInner {
    /// Record that a mutation happened.
    pub(crate) fn touch(&mut self) {
        self.modified = true;
    }
}

/// An open presentation document.
///
/// All access to slides, shapes and text goes through handles cloned
/// from this root object; dropping the `Presentation` while handles
/// are alive is fine, they share ownership of the document state.
///
/// # Examples
///
/// ```rust
/// use quince::presentation::Presentation;
///
/// let xml = r#"<p:presentation><p:sld id="s1"><p:spTree/></p:sld></p:presentation>"#;
/// let prs = Presentation::from_xml(xml).unwrap();
/// assert_eq!(prs.slides().len(), 1);
/// assert!(!prs.is_modified());
/// ```
#[derive(Debug)]
pub struct Presentation {
    inner: Rc<RefCell<DocumentInner>>,
}

impl Presentation {
    /// Load a presentation from its XML form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Xml`] for malformed markup and
    /// [`Error::InvalidFormat`] when the root element is not a
    /// presentation.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let tree = parse(xml)?;
        if tree.local_tag(tree.root()) != "presentation" {
            return Err(Error::InvalidFormat(format!(
                "expected a presentation root, found <{}>",
                tree.tag(tree.root())
            )));
        }
        Ok(Self {
            inner: Rc::new(RefCell::new(DocumentInner {
                tree,
                modified: false,
            })),
        })
    }

    /// Open a presentation file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let xml = fs::read_to_string(path)?;
        Self::from_xml(&xml)
    }

    /// Serialize the document back to XML.
    pub fn to_xml(&self) -> String {
        serialize(&self.inner.borrow().tree)
    }

    /// Write the document to a file and clear the modified flag.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let xml = self.to_xml();
        fs::write(path, xml)?;
        self.inner.borrow_mut().modified = false;
        Ok(())
    }

    /// Whether any mutation happened since load or the last save.
    pub fn is_modified(&self) -> bool {
        self.inner.borrow().modified
    }

    /// The slides of the presentation, in document order.
    pub fn slides(&self) -> Vec<Slide> {
        let inner = self.inner.borrow();
        let tree = &inner.tree;
        tree.children(tree.root(), "sld")
            .map(|node| Slide {
                doc: Rc::clone(&self.inner),
                node,
            })
            .collect()
    }

    /// The slide layouts of the presentation.
    pub fn layouts(&self) -> Vec<SlideLayout> {
        let inner = self.inner.borrow();
        let tree = &inner.tree;
        tree.children(tree.root(), "sldLayout")
            .map(|node| SlideLayout {
                doc: Rc::clone(&self.inner),
                node,
            })
            .collect()
    }

    /// The slide masters of the presentation.
    pub fn masters(&self) -> Vec<SlideMaster> {
        let inner = self.inner.borrow();
        let tree = &inner.tree;
        tree.children(tree.root(), "sldMaster")
            .map(|node| SlideMaster {
                doc: Rc::clone(&self.inner),
                node,
            })
            .collect()
    }

    /// The document theme, if present.
    pub fn theme(&self) -> Option<Theme> {
        let inner = self.inner.borrow();
        let tree = &inner.tree;
        let node = tree.child(tree.root(), "theme")?;
        Some(Theme {
            doc: Rc::clone(&self.inner),
            node,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<p:presentation>
        <a:theme><a:themeElements><a:clrScheme>
            <a:dk1><a:srgbClr val="000000"/></a:dk1>
        </a:clrScheme></a:themeElements></a:theme>
        <p:sldMaster id="m1"><p:spTree/></p:sldMaster>
        <p:sldLayout id="l1" master="m1"><p:spTree/></p:sldLayout>
        <p:sld id="s1" layout="l1"><p:spTree/></p:sld>
        <p:sld id="s2" layout="l1"><p:spTree/></p:sld>
    </p:presentation>"#;

    #[test]
    fn test_part_collections() {
        let prs = Presentation::from_xml(DOC).unwrap();
        assert_eq!(prs.slides().len(), 2);
        assert_eq!(prs.layouts().len(), 1);
        assert_eq!(prs.masters().len(), 1);
        assert!(prs.theme().is_some());
    }

    #[test]
    fn test_wrong_root_is_invalid() {
        let err = Presentation::from_xml("<p:sld/>").unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }

    #[test]
    fn test_xml_roundtrip_preserves_parts() {
        let prs = Presentation::from_xml(DOC).unwrap();
        let again = Presentation::from_xml(&prs.to_xml()).unwrap();
        assert_eq!(again.slides().len(), 2);
        assert_eq!(again.slides()[1].id().as_deref(), Some("s2"));
    }

    #[test]
    fn test_save_clears_modified_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.xml");
        let prs = Presentation::from_xml(DOC).unwrap();
        prs.inner.borrow_mut().touch();
        assert!(prs.is_modified());
        prs.save(&path).unwrap();
        assert!(!prs.is_modified());

        let reopened = Presentation::open(&path).unwrap();
        assert_eq!(reopened.slides().len(), 2);
        assert!(!reopened.is_modified());
    }
}
