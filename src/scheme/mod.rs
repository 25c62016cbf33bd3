//! Scheme color model and resolution.
//!
//! A color in presentation markup is either a literal RGB value or a
//! reference to a named slot of the document theme's color scheme.
//! Slot references may additionally be redirected by per-master or
//! per-layout color mappings before the final theme lookup. This
//! module owns that entire indirection.

// Submodule declarations
pub mod resolver;
pub mod types;

// Re-exports
pub use resolver::{MAX_MAPPING_HOPS, resolve_color, resolve_slot};
pub use types::{Color, ColorMapping, ColorScheme, SchemeSlot};
