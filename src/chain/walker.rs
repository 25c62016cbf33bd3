//! Ordered-fallback property resolution.
//!
//! Every formatting property is resolved the same way: collect the
//! chain of nodes that may carry it, closest to the leaf first, and
//! take the first explicit value. The collectors here produce those
//! chains for the three property scopes (run, paragraph, text box);
//! [`resolve_first`] is the single generic search they all feed.
use smallvec::SmallVec;

use crate::chain::context::{
    ShapeContext, ancestor_parts, find_placeholder, placeholder_key,
};
use crate::common::RGBColor;
use crate::scheme::{Color, SchemeSlot};
use crate::xml::{NodeId, XmlTree};

/// Return the first explicit value along an ordered chain of levels.
///
/// The closest-to-leaf level with a non-absent value wins; levels that
/// yield `None` are skipped. Absence at every level is reported as
/// `None`, leaving any terminal default to the caller.
pub fn resolve_first<L, T>(
    levels: impl IntoIterator<Item = L>,
    mut read: impl FnMut(&L) -> Option<T>,
) -> Option<T> {
    levels.into_iter().find_map(|level| read(&level))
}

/// The `txBody` elements of correlated placeholder shapes on ancestor
/// parts, nearest first.
///
/// A part where the key matches nothing contributes no entry; the walk
/// continues upward instead of aborting. Non-placeholder shapes have
/// no ancestor text bodies at all.
pub fn placeholder_txbodies(tree: &XmlTree, ctx: &ShapeContext) -> SmallVec<[NodeId; 2]> {
    let mut bodies = SmallVec::new();
    let Some(key) = placeholder_key(tree, ctx.shape) else {
        return bodies;
    };
    for part in ancestor_parts(tree, ctx) {
        // Masters rarely repeat a layout's indices, so type-only
        // correlation applies there.
        let type_only = tree.local_tag(part) == "sldMaster";
        if let Some(shape) = find_placeholder(tree, part, &key, type_only) {
            if let Some(txbody) = tree.child(shape, "txBody") {
                bodies.push(txbody);
            }
        }
    }
    bodies
}

/// The `defRPr` inside a `lstStyle` for a given indent level (0-based).
fn lst_style_def_rpr(tree: &XmlTree, txbody: NodeId, level: u8) -> Option<NodeId> {
    let lst_style = tree.child(txbody, "lstStyle")?;
    let lvl_ppr = tree.child(lst_style, &format!("lvl{}pPr", level + 1))?;
    tree.child(lvl_ppr, "defRPr")
}

/// The `lvl{N}pPr` inside a `lstStyle` for a given indent level.
fn lst_style_lvl_ppr(tree: &XmlTree, txbody: NodeId, level: u8) -> Option<NodeId> {
    let lst_style = tree.child(txbody, "lstStyle")?;
    tree.child(lst_style, &format!("lvl{}pPr", level + 1))
}

/// Deepest indent level the markup defines (`lvl1pPr`..`lvl9pPr`).
const MAX_INDENT_LEVEL: u8 = 8;

/// Indent level of a paragraph (0-based, default 0).
///
/// Out-of-range `lvl` values are clamped to [`MAX_INDENT_LEVEL`].
pub fn paragraph_level(tree: &XmlTree, paragraph: NodeId) -> u8 {
    tree.child(paragraph, "pPr")
        .and_then(|ppr| tree.attribute(ppr, "lvl"))
        .and_then(|v| v.parse::<u8>().ok())
        .map_or(0, |lvl| lvl.min(MAX_INDENT_LEVEL))
}

/// Collect the run-property (`rPr`-shaped) nodes governing a portion,
/// in resolution order.
///
/// The chain is: the run's own `rPr`, the paragraph's `pPr/defRPr`,
/// the owning shape's `lstStyle` defaults for the paragraph's indent
/// level, then the same `lstStyle` defaults on the correlated layout
/// and master placeholders.
pub fn run_property_nodes(tree: &XmlTree, portion: NodeId) -> SmallVec<[NodeId; 6]> {
    let mut nodes = SmallVec::new();

    if let Some(rpr) = tree.child(portion, "rPr") {
        nodes.push(rpr);
    }

    let Some(paragraph) = tree.parent(portion) else {
        return nodes;
    };
    if let Some(def_rpr) = tree
        .child(paragraph, "pPr")
        .and_then(|ppr| tree.child(ppr, "defRPr"))
    {
        nodes.push(def_rpr);
    }

    let level = paragraph_level(tree, paragraph);
    let Some(txbody) = tree.parent(paragraph) else {
        return nodes;
    };
    if let Some(def_rpr) = lst_style_def_rpr(tree, txbody, level) {
        nodes.push(def_rpr);
    }

    if let Some(shape) = tree.parent(txbody) {
        if let Some(ctx) = ShapeContext::for_shape(tree, shape) {
            for ph_body in placeholder_txbodies(tree, &ctx) {
                if let Some(def_rpr) = lst_style_def_rpr(tree, ph_body, level) {
                    nodes.push(def_rpr);
                }
            }
        }
    }
    nodes
}

/// Collect the paragraph-property (`pPr`-shaped) nodes governing a
/// paragraph, in resolution order.
pub fn paragraph_property_nodes(tree: &XmlTree, paragraph: NodeId) -> SmallVec<[NodeId; 4]> {
    let mut nodes = SmallVec::new();

    if let Some(ppr) = tree.child(paragraph, "pPr") {
        nodes.push(ppr);
    }

    let level = paragraph_level(tree, paragraph);
    let Some(txbody) = tree.parent(paragraph) else {
        return nodes;
    };
    if let Some(lvl_ppr) = lst_style_lvl_ppr(tree, txbody, level) {
        nodes.push(lvl_ppr);
    }

    if let Some(shape) = tree.parent(txbody) {
        if let Some(ctx) = ShapeContext::for_shape(tree, shape) {
            for ph_body in placeholder_txbodies(tree, &ctx) {
                if let Some(lvl_ppr) = lst_style_lvl_ppr(tree, ph_body, level) {
                    nodes.push(lvl_ppr);
                }
            }
        }
    }
    nodes
}

/// Collect the `bodyPr` nodes governing a text box, in resolution
/// order: the box's own, then the correlated layout and master
/// placeholders'. Run and paragraph levels are skipped for box-scoped
/// properties.
pub fn body_property_nodes(tree: &XmlTree, txbody: NodeId) -> SmallVec<[NodeId; 3]> {
    let mut nodes = SmallVec::new();

    if let Some(body_pr) = tree.child(txbody, "bodyPr") {
        nodes.push(body_pr);
    }

    if let Some(shape) = tree.parent(txbody) {
        if let Some(ctx) = ShapeContext::for_shape(tree, shape) {
            for ph_body in placeholder_txbodies(tree, &ctx) {
                if let Some(body_pr) = tree.child(ph_body, "bodyPr") {
                    nodes.push(body_pr);
                }
            }
        }
    }
    nodes
}

/// Read the fill color carried by an `rPr`-shaped node, if any.
pub fn read_fill_color(tree: &XmlTree, rpr: NodeId) -> Option<Color> {
    let fill = tree.child(rpr, "solidFill")?;
    if let Some(srgb) = tree.child(fill, "srgbClr") {
        let rgb = tree.attribute(srgb, "val").and_then(RGBColor::from_hex)?;
        return Some(Color::Rgb(rgb));
    }
    if let Some(scheme) = tree.child(fill, "schemeClr") {
        let slot = tree.attribute(scheme, "val").and_then(SchemeSlot::from_name)?;
        return Some(Color::Scheme(slot));
    }
    None
}

/// Read a markup boolean attribute (`1`/`true`/`0`/`false`).
pub fn read_bool_attr(tree: &XmlTree, node: NodeId, name: &str) -> Option<bool> {
    match tree.attribute(node, name)? {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Read a font size attribute (`sz`, hundredths of a point).
pub fn read_font_size(tree: &XmlTree, rpr: NodeId) -> Option<f64> {
    let hundredths: i64 = tree.attribute(rpr, "sz")?.parse().ok()?;
    Some(hundredths as f64 / 100.0)
}
