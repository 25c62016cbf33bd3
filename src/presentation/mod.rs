//! The presentation document and its part handles.

// Submodule declarations
pub mod prs;
pub mod shape;
pub mod slide;

// Re-exports
pub use prs::Presentation;
pub use shape::Shape;
pub use slide::{Slide, SlideLayout, SlideMaster, Theme};
