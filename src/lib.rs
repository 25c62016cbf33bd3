//! # Quince
//!
//! An editable object model for presentation documents, centered on
//! hierarchical style resolution: every formatting property of a piece
//! of text is answered by walking the inheritance chain (run,
//! paragraph, shape list style, layout placeholder, master
//! placeholder, theme) and taking the first explicit value.
//!
//! ## Features
//!
//! - Presentation parts: slides, layouts, masters and the theme, with
//!   layout/master relations resolved by id reference
//! - Text model: text boxes, paragraphs, portions and fonts, with
//!   chain-resolved getters and write-at-leaf setters
//! - Scheme colors: theme color schemes, `clrMap`/`clrMapOvr`
//!   indirection with bounded hop resolution
//! - Markdown-subset text writing (bold, italic, paragraph breaks)
//! - XML round trip at the persistence boundary
//!
//! ## Example
//!
//! ```rust
//! use quince::presentation::Presentation;
//!
//! let xml = r#"<p:presentation><p:sld id="s1"><p:spTree><p:sp>
//!     <p:nvSpPr><p:cNvPr id="2" name="Title 1"/></p:nvSpPr>
//!     <p:txBody><a:bodyPr/><a:p><a:r><a:t>Hello</a:t></a:r></a:p></p:txBody>
//! </p:sp></p:spTree></p:sld></p:presentation>"#;
//!
//! let prs = Presentation::from_xml(xml)?;
//! let slide = prs.slides().remove(0);
//! let shape = slide.shape("Title 1").unwrap();
//! let textbox = shape.text_box().unwrap();
//! assert_eq!(textbox.text(), "Hello");
//!
//! textbox.set_text("Goodbye");
//! assert!(prs.is_modified());
//! # Ok::<(), quince::common::Error>(())
//! ```

pub mod chain;
pub mod common;
pub mod markdown;
pub mod presentation;
pub mod scheme;
pub mod text;
pub mod xml;

// Convenience re-exports of the main entry points
pub use common::{Error, Result};
pub use presentation::{Presentation, Shape, Slide, SlideLayout, SlideMaster, Theme};
pub use text::{Font, FontColor, Paragraph, Portion, TextBox};
