//! Shape context and inheritance-chain relations.
//!
//! Everything the walker needs to know about where a shape sits: which
//! slide/layout/master owns it, which ancestors its placeholder key
//! correlates to, and which color mappings and theme scheme govern its
//! colors. All lookups are id-based (`layout="..."`, `master="..."`
//! reference attributes), never structural pointers, and are
//! recomputed per call.
use smallvec::SmallVec;

use crate::scheme::{ColorMapping, ColorScheme};
use crate::xml::{NodeId, XmlTree};

/// Which kind of part a shape lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginKind {
    /// An ordinary slide (`p:sld`)
    Slide,
    /// A slide layout (`p:sldLayout`)
    Layout,
    /// A slide master (`p:sldMaster`)
    Master,
}

/// The placeholder correlation key of a shape.
///
/// Read from `p:nvSpPr/p:nvPr/p:ph`. A `ph` element with no `type`
/// attribute defaults to `body`, a missing `idx` to 0, per the markup
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderKey {
    /// Placeholder type name (`title`, `body`, `ctrTitle`, ...)
    pub ph_type: String,
    /// Placeholder index within its scope
    pub idx: u32,
}

/// A shape's position in the inheritance hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct ShapeContext {
    /// The `p:sp` element
    pub shape: NodeId,
    /// The owning `p:sld` / `p:sldLayout` / `p:sldMaster` element
    pub origin: NodeId,
    /// What kind of part `origin` is
    pub kind: OriginKind,
}

impl ShapeContext {
    /// Build the context for a shape by walking its ancestors.
    pub fn for_shape(tree: &XmlTree, shape: NodeId) -> Option<Self> {
        let mut cursor = tree.parent(shape);
        while let Some(node) = cursor {
            let kind = match tree.local_tag(node) {
                "sld" => Some(OriginKind::Slide),
                "sldLayout" => Some(OriginKind::Layout),
                "sldMaster" => Some(OriginKind::Master),
                _ => None,
            };
            if let Some(kind) = kind {
                return Some(Self {
                    shape,
                    origin: node,
                    kind,
                });
            }
            cursor = tree.parent(node);
        }
        None
    }
}

/// Read a shape's placeholder key, if it is a placeholder.
pub fn placeholder_key(tree: &XmlTree, shape: NodeId) -> Option<PlaceholderKey> {
    let nv_sp_pr = tree.child(shape, "nvSpPr")?;
    let nv_pr = tree.child(nv_sp_pr, "nvPr")?;
    let ph = tree.child(nv_pr, "ph")?;
    let ph_type = tree.attribute(ph, "type").unwrap_or("body").to_string();
    let idx = tree
        .attribute(ph, "idx")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    Some(PlaceholderKey { ph_type, idx })
}

/// Find the placeholder shape matching `key` in a part's shape tree.
///
/// Matching is by exact `(type, idx)`. When `type_only_fallback` is
/// set (used at the master level, whose placeholders rarely repeat a
/// layout's indices) a shape agreeing on type alone also matches.
pub fn find_placeholder(
    tree: &XmlTree,
    part: NodeId,
    key: &PlaceholderKey,
    type_only_fallback: bool,
) -> Option<NodeId> {
    let sp_tree = tree.child(part, "spTree")?;
    let mut type_match = None;
    for shape in tree.children(sp_tree, "sp") {
        if let Some(candidate) = placeholder_key(tree, shape) {
            if candidate == *key {
                return Some(shape);
            }
            if candidate.ph_type == key.ph_type && type_match.is_none() {
                type_match = Some(shape);
            }
        }
    }
    if type_only_fallback { type_match } else { None }
}

/// Find a part element by its `id` attribute among root children with
/// the given local tag.
fn part_by_id(tree: &XmlTree, tag: &str, id: &str) -> Option<NodeId> {
    tree.children(tree.root(), tag)
        .find(|&part| tree.attribute(part, "id") == Some(id))
}

/// The layout a slide references, if resolvable.
pub fn layout_of(tree: &XmlTree, slide: NodeId) -> Option<NodeId> {
    let layout_id = tree.attribute(slide, "layout")?;
    part_by_id(tree, "sldLayout", layout_id)
}

/// The master a layout references, if resolvable.
pub fn master_of(tree: &XmlTree, layout: NodeId) -> Option<NodeId> {
    let master_id = tree.attribute(layout, "master")?;
    part_by_id(tree, "sldMaster", master_id)
}

/// Ancestor parts of a context in resolution order (nearest first).
///
/// Slide → `[layout, master]`, layout → `[master]`, master → `[]`.
/// Unresolvable references simply shorten the list; a dangling link is
/// absence, not an error.
pub fn ancestor_parts(tree: &XmlTree, ctx: &ShapeContext) -> SmallVec<[NodeId; 2]> {
    let mut parts = SmallVec::new();
    match ctx.kind {
        OriginKind::Slide => {
            if let Some(layout) = layout_of(tree, ctx.origin) {
                parts.push(layout);
                if let Some(master) = master_of(tree, layout) {
                    parts.push(master);
                }
            }
        },
        OriginKind::Layout => {
            if let Some(master) = master_of(tree, ctx.origin) {
                parts.push(master);
            }
        },
        OriginKind::Master => {},
    }
    parts
}

/// The master governing a context, if any.
pub fn master_for(tree: &XmlTree, ctx: &ShapeContext) -> Option<NodeId> {
    match ctx.kind {
        OriginKind::Master => Some(ctx.origin),
        OriginKind::Layout => master_of(tree, ctx.origin),
        OriginKind::Slide => {
            let layout = layout_of(tree, ctx.origin)?;
            master_of(tree, layout)
        },
    }
}

/// The theme's `clrScheme` element.
pub fn theme_clr_scheme(tree: &XmlTree) -> Option<NodeId> {
    let theme = tree.child(tree.root(), "theme")?;
    // Either directly under the theme or inside a:themeElements.
    tree.child(theme, "clrScheme").or_else(|| {
        let elements = tree.child(theme, "themeElements")?;
        tree.child(elements, "clrScheme")
    })
}

/// The theme color scheme for the document.
pub fn theme_scheme(tree: &XmlTree) -> ColorScheme {
    theme_clr_scheme(tree)
        .map(|n| ColorScheme::from_node(tree, n))
        .unwrap_or_default()
}

/// Read the color-mapping override of a slide or layout, if any.
///
/// A `clrMapOvr` either defers to the master (`a:masterClrMapping`,
/// treated as no mapping here) or carries `a:overrideClrMapping` with
/// clrMap-shaped attributes.
fn mapping_override(tree: &XmlTree, part: NodeId) -> Option<ColorMapping> {
    let ovr = tree.child(part, "clrMapOvr")?;
    let explicit = tree.child(ovr, "overrideClrMapping")?;
    let mapping = ColorMapping::from_node(tree, explicit);
    (!mapping.is_empty()).then_some(mapping)
}

/// Collect the color mappings governing a context, most specific first.
///
/// Slide and layout contribute their `clrMapOvr` overrides (when
/// explicit), the master its `clrMap`.
pub fn color_mappings(tree: &XmlTree, ctx: &ShapeContext) -> SmallVec<[ColorMapping; 3]> {
    let mut mappings = SmallVec::new();

    let (slide, layout) = match ctx.kind {
        OriginKind::Slide => (Some(ctx.origin), layout_of(tree, ctx.origin)),
        OriginKind::Layout => (None, Some(ctx.origin)),
        OriginKind::Master => (None, None),
    };
    let master = master_for(tree, ctx);

    if let Some(mapping) = slide.and_then(|s| mapping_override(tree, s)) {
        mappings.push(mapping);
    }
    if let Some(mapping) = layout.and_then(|l| mapping_override(tree, l)) {
        mappings.push(mapping);
    }
    if let Some(master) = master {
        if let Some(clr_map) = tree.child(master, "clrMap") {
            let mapping = ColorMapping::from_node(tree, clr_map);
            if !mapping.is_empty() {
                mappings.push(mapping);
            }
        }
    }
    mappings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::SchemeSlot;
    use crate::xml::parse;

    const DOC: &str = r#"<p:presentation>
        <a:theme><a:themeElements><a:clrScheme>
            <a:dk1><a:srgbClr val="000000"/></a:dk1>
            <a:accent2><a:srgbClr val="0070C0"/></a:accent2>
        </a:clrScheme></a:themeElements></a:theme>
        <p:sldMaster id="m1">
            <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2"/>
            <p:spTree>
                <p:sp><p:nvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr></p:sp>
            </p:spTree>
        </p:sldMaster>
        <p:sldLayout id="l1" master="m1">
            <p:clrMapOvr><a:overrideClrMapping bg1="accent2"/></p:clrMapOvr>
            <p:spTree>
                <p:sp><p:nvSpPr><p:nvPr><p:ph type="title" idx="1"/></p:nvPr></p:nvSpPr></p:sp>
            </p:spTree>
        </p:sldLayout>
        <p:sld id="s1" layout="l1">
            <p:spTree>
                <p:sp><p:nvSpPr><p:nvPr><p:ph type="title" idx="1"/></p:nvPr></p:nvSpPr></p:sp>
            </p:spTree>
        </p:sld>
    </p:presentation>"#;

    fn slide_shape(tree: &XmlTree) -> NodeId {
        let slide = tree.children(tree.root(), "sld").next().unwrap();
        let sp_tree = tree.child(slide, "spTree").unwrap();
        tree.child(sp_tree, "sp").unwrap()
    }

    #[test]
    fn test_context_identifies_origin() {
        let tree = parse(DOC).unwrap();
        let shape = slide_shape(&tree);
        let ctx = ShapeContext::for_shape(&tree, shape).unwrap();
        assert_eq!(ctx.kind, OriginKind::Slide);
        assert_eq!(tree.attribute(ctx.origin, "id"), Some("s1"));
    }

    #[test]
    fn test_ancestor_parts_follow_id_links() {
        let tree = parse(DOC).unwrap();
        let ctx = ShapeContext::for_shape(&tree, slide_shape(&tree)).unwrap();
        let parts = ancestor_parts(&tree, &ctx);
        assert_eq!(parts.len(), 2);
        assert_eq!(tree.attribute(parts[0], "id"), Some("l1"));
        assert_eq!(tree.attribute(parts[1], "id"), Some("m1"));
    }

    #[test]
    fn test_placeholder_correlation_exact_then_type_only() {
        let tree = parse(DOC).unwrap();
        let ctx = ShapeContext::for_shape(&tree, slide_shape(&tree)).unwrap();
        let key = placeholder_key(&tree, ctx.shape).unwrap();
        let parts = ancestor_parts(&tree, &ctx);

        // Exact (type, idx) match on the layout.
        assert!(find_placeholder(&tree, parts[0], &key, false).is_some());
        // Master carries idx 0: exact match fails, type fallback hits.
        assert!(find_placeholder(&tree, parts[1], &key, false).is_none());
        assert!(find_placeholder(&tree, parts[1], &key, true).is_some());
    }

    #[test]
    fn test_color_mappings_most_specific_first() {
        let tree = parse(DOC).unwrap();
        let ctx = ShapeContext::for_shape(&tree, slide_shape(&tree)).unwrap();
        let mappings = color_mappings(&tree, &ctx);
        assert_eq!(mappings.len(), 2);
        // Layout override redirects bg1 to accent2, master maps tx1.
        assert_eq!(
            mappings[0].lookup(SchemeSlot::Background1),
            Some(SchemeSlot::Accent2)
        );
        assert_eq!(mappings[1].lookup(SchemeSlot::Text1), Some(SchemeSlot::Dark1));
    }

    #[test]
    fn test_missing_ph_is_not_a_placeholder() {
        let tree = parse("<p:sld><p:spTree><p:sp><p:nvSpPr/></p:sp></p:spTree></p:sld>").unwrap();
        let sp_tree = tree.child(tree.root(), "spTree").unwrap();
        let shape = tree.child(sp_tree, "sp").unwrap();
        assert!(placeholder_key(&tree, shape).is_none());
    }
}
