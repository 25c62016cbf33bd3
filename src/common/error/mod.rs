//! Unified error types for the Quince library.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
