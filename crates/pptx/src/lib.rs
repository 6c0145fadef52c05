//! PPTX (Office Open XML) backend for slide-deck translation.
//!
//! A .pptx file is a ZIP archive of XML parts. Slides are parsed into a shape
//! tree whose runs can be listed and rewritten in place; everything else in
//! the archive is carried through untouched.

pub mod deck;
pub mod extract;
pub mod package;
pub mod parser;
pub mod rewrite;
pub mod slide;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;

pub use deck::Deck;
pub use extract::TextExtractor;
pub use slide::{Paragraph, RunSlot, Shape, Slide, TextFrame};
