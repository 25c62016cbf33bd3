//! The style inheritance chain.
//!
//! Formatting properties are rarely set where they are read: a run's
//! color may come from its paragraph, its shape's list style, a
//! placeholder on the slide layout or master, or the theme. This
//! module models that chain as an explicit ordered list of concrete
//! consultation points per property scope instead of a virtual
//! dispatch hierarchy, so each property's fallback order stays
//! declarative and testable in isolation.

// Submodule declarations
pub mod context;
pub mod walker;

// Re-exports
pub use context::{
    OriginKind, PlaceholderKey, ShapeContext, ancestor_parts, color_mappings, find_placeholder,
    layout_of, master_of, placeholder_key, theme_clr_scheme, theme_scheme,
};
pub use walker::{
    body_property_nodes, paragraph_level, paragraph_property_nodes, placeholder_txbodies,
    read_bool_attr, read_fill_color, read_font_size, resolve_first, run_property_nodes,
};
