//! Unified error types for the Quince library.
//!
//! This module provides a single error type covering the XML boundary,
//! style resolution, and mutation validation, presenting a consistent
//! API to users.
use thiserror::Error;

/// Main error type for Quince operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing or serialization error
    #[error("XML error: {0}")]
    Xml(String),

    /// Document structure does not match the expected vocabulary
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A referenced part of the document tree is missing
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// A scheme color reference could not be resolved.
    ///
    /// Raised for an unknown slot name or when the color-mapping chain
    /// exceeds its hop bound (a mapping cycle). Distinct from a property
    /// being legitimately unset, which is reported as `None`.
    #[error("Scheme color resolution failed: {0}")]
    SchemeResolution(String),

    /// A color string passed to a setter was rejected before any write
    #[error("Invalid color value: {0}")]
    InvalidColor(String),
}

/// Result type for Quince operations.
pub type Result<T> = std::result::Result<T, Error>;
