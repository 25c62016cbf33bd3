//! XML node tree and the accessor contract the resolver depends on.
//!
//! The style engine never reads markup syntax directly: it navigates
//! an [`XmlTree`] through typed accessors (`attribute`, `child`,
//! `children`, `set_attribute`). `parse`/`serialize` form the
//! persistence boundary with the external package layer.

// Submodule declarations
pub mod node;
pub mod reader;
pub mod writer;

// Re-exports
pub use node::{NodeId, XmlTree};
pub use reader::parse;
pub use writer::serialize;
