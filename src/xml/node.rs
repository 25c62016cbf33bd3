//! Arena-backed XML node tree.
//!
//! The tree is the navigable structure the resolution engine works
//! over: typed nodes addressed by [`NodeId`], each carrying a tag,
//! attributes, ordered children and an optional text payload. All
//! style resolution and mutation goes through the accessor methods
//! here; nothing above this layer touches markup syntax.

/// Identifier of a node within an [`XmlTree`].
///
/// Ids are indices into the tree's arena and stay valid for the
/// lifetime of the tree. Removing a node detaches it from its parent
/// but never invalidates other ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Data stored for a single element node.
#[derive(Debug, Clone)]
struct NodeData {
    /// Qualified tag name, e.g. `a:bodyPr`
    tag: String,
    /// Attributes in document order, qualified names
    attrs: Vec<(String, String)>,
    /// Child element ids in document order
    children: Vec<NodeId>,
    /// Parent element, `None` for the root and detached nodes
    parent: Option<NodeId>,
    /// Character content (only leaf text elements carry any)
    text: String,
}

/// An XML element tree with id-based node access.
///
/// # Examples
///
/// ```rust
/// use quince::xml::XmlTree;
///
/// let mut tree = XmlTree::new("p:presentation");
/// let slide = tree.append_child(tree.root(), "p:sld");
/// tree.set_attribute(slide, "id", "s1");
/// assert_eq!(tree.attribute(slide, "id"), Some("s1"));
/// ```
#[derive(Debug, Clone)]
pub struct XmlTree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

/// Strip a namespace prefix from a qualified name.
#[inline]
fn local_name(tag: &str) -> &str {
    match tag.split_once(':') {
        Some((_, local)) => local,
        None => tag,
    }
}

impl XmlTree {
    /// Create a tree containing only a root element.
    pub fn new(root_tag: impl Into<String>) -> Self {
        let root_data = NodeData {
            tag: root_tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
            parent: None,
            text: String::new(),
        };
        Self {
            nodes: vec![root_data],
            root: NodeId(0),
        }
    }

    /// The root element id.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Qualified tag name of a node.
    #[inline]
    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].tag
    }

    /// Tag name of a node without its namespace prefix.
    #[inline]
    pub fn local_tag(&self, id: NodeId) -> &str {
        local_name(&self.nodes[id.index()].tag)
    }

    /// Parent of a node, `None` for the root.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Look up an attribute value by qualified name.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.index()]
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attribute(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let attrs = &mut self.nodes[id.index()].attrs;
        match attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => attrs.push((name, value)),
        }
    }

    /// Remove an attribute if present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        self.nodes[id.index()].attrs.retain(|(k, _)| k != name);
    }

    /// Attributes of a node in document order.
    #[inline]
    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        &self.nodes[id.index()].attrs
    }

    /// First child whose local tag name matches `tag`.
    pub fn child(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.nodes[id.index()]
            .children
            .iter()
            .copied()
            .find(|&c| self.local_tag(c) == tag)
    }

    /// All children whose local tag name matches `tag`, in document order.
    pub fn children<'a>(&'a self, id: NodeId, tag: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes[id.index()]
            .children
            .iter()
            .copied()
            .filter(move |&c| self.local_tag(c) == tag)
    }

    /// All children of a node in document order.
    #[inline]
    pub fn all_children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Character content of a node.
    #[inline]
    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].text
    }

    /// Replace the character content of a node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.nodes[id.index()].text = text.into();
    }

    /// Append a new child element and return its id.
    pub fn append_child(&mut self, parent: NodeId, tag: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
            parent: Some(parent),
            text: String::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Insert a new child element at `index` among the parent's children.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, tag: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
            parent: Some(parent),
            text: String::new(),
        });
        let children = &mut self.nodes[parent.index()].children;
        let index = index.min(children.len());
        children.insert(index, id);
        id
    }

    /// Position of a child among its parent's children.
    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.nodes[id.index()].parent?;
        self.nodes[parent.index()]
            .children
            .iter()
            .position(|&c| c == id)
    }

    /// Detach a child from its parent.
    ///
    /// The node's storage stays in the arena (ids remain valid) but it
    /// is no longer reachable from the root and will not serialize.
    pub fn remove_child(&mut self, parent: NodeId, id: NodeId) {
        self.nodes[parent.index()].children.retain(|&c| c != id);
        self.nodes[id.index()].parent = None;
    }

    /// Detach every child whose local tag name matches `tag`.
    pub fn remove_children(&mut self, parent: NodeId, tag: &str) {
        let doomed: Vec<NodeId> = self.children(parent, tag).collect();
        for id in doomed {
            self.remove_child(parent, id);
        }
    }

    /// Find the nearest ancestor (including `id` itself) with the given
    /// local tag name.
    pub fn ancestor(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if self.local_tag(node) == tag {
                return Some(node);
            }
            cursor = self.parent(node);
        }
        None
    }

    /// A stable, human-readable locator for a node.
    ///
    /// The path lists qualified tags from the root with 1-based indices
    /// counted among same-tag siblings, e.g.
    /// `/p:presentation[1]/p:sld[1]/p:spTree[1]/p:sp[2]/p:txBody[1]`.
    pub fn node_path(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            let tag = self.tag(node);
            let position = match self.parent(node) {
                Some(parent) => {
                    self.children_with_tag(parent, tag)
                        .iter()
                        .position(|&c| c == node)
                        .unwrap_or(0)
                        + 1
                },
                None => 1,
            };
            segments.push(format!("{}[{}]", tag, position));
            cursor = self.parent(node);
        }
        segments.reverse();
        let mut path = String::new();
        for segment in segments {
            path.push('/');
            path.push_str(&segment);
        }
        path
    }

    /// Children sharing the exact qualified tag, in document order.
    fn children_with_tag(&self, parent: NodeId, tag: &str) -> Vec<NodeId> {
        self.nodes[parent.index()]
            .children
            .iter()
            .copied()
            .filter(|&c| self.tag(c) == tag)
            .collect()
    }
}
