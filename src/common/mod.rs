//! Common types and utilities shared across the document model.
//!
//! This module provides the crate-wide error type and the small value
//! types (colors, lengths) used by both the resolution engine and the
//! text object model.

// Submodule declarations
pub mod error;
pub mod style;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use style::{Length, RGBColor};
