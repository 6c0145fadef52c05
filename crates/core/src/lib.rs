//! Core domain types, errors, and the translation capability shared by the
//! slide-deck translator crates.

pub mod error;
pub mod language;
pub mod translator;
pub mod types;

pub use error::{Error, ProviderError, Result};
pub use translator::Translator;
pub use types::{DeckFormat, ProviderKind, RunHandle, RunStyle, TextUnit, TranslationRequest};
