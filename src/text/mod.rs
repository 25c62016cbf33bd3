//! The text frame model.
//!
//! A shape's text body decomposes into paragraphs of portions, each
//! portion carrying a font. Handles in this module read formatting
//! through the style inheritance chain and write it back at the leaf
//! they address.

// Submodule declarations
pub mod font;
pub mod paragraph;
pub mod portion;
pub mod textbox;
pub mod types;

// Re-exports
pub use font::{Font, FontColor};
pub use paragraph::Paragraph;
pub use portion::Portion;
pub use textbox::TextBox;
pub use types::{AutofitType, ColorType, TextAlignment, TextDirection, TextVerticalAlignment};
