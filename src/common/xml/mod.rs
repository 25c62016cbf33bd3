//! Low-level XML text helpers.

// Submodule declarations
pub mod escape;

// Re-exports
pub use escape::{escape_xml, resolve_entity, unescape_xml};
