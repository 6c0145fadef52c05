//! Domain types shared by the deck parser, the providers, and the pipeline.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The format of the source presentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckFormat {
    /// Modern PPTX (Office Open XML).
    Pptx,
    /// Legacy PPT (OLE/CFB binary). Detected only so it can be rejected.
    Ppt,
}

impl DeckFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pptx" => Some(Self::Pptx),
            "ppt" => Some(Self::Ppt),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        // PPT is an OLE/CFB file (D0 CF 11 E0 A1 B1 1A E1)
        if bytes.len() >= 8
            && bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        {
            return Some(Self::Ppt);
        }

        None
    }
}

/// Location of a single run inside a deck.
///
/// Handles are produced by extraction and stay valid for the lifetime of the
/// deck they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunHandle {
    /// 0-based slide index in presentation order.
    pub slide: usize,
    /// Paragraph ordinal within the slide.
    pub paragraph: usize,
    /// Run ordinal within the slide.
    pub run: usize,
}

impl fmt::Display for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slide {} paragraph {} run {}",
            self.slide + 1,
            self.paragraph,
            self.run
        )
    }
}

/// A translatable run together with its original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    pub handle: RunHandle,
    pub text: String,
}

/// Character formatting of a run, as read from `a:rPr`.
///
/// `None` means the attribute is inherited from the paragraph, the shape, or
/// the master.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStyle {
    pub lang: Option<String>,
    /// Size in hundredths of a point.
    pub size: Option<u32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<String>,
    /// Latin typeface name.
    pub typeface: Option<String>,
    /// `srgbClr` hex value or `schemeClr` name of the solid fill.
    pub color: Option<String>,
}

/// Which translation backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Free web translation endpoint.
    #[default]
    Google,
    /// OpenAI-compatible chat completion API.
    OpenAi,
}

impl ProviderKind {
    /// Convert to lowercase string identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::OpenAi => "openai",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" | "web" | "free" => Ok(Self::Google),
            "openai" | "llm" | "gpt" => Ok(Self::OpenAi),
            _ => Err(Error::UnknownProvider(s.to_string())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One text to translate. A plain value with no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub provider: ProviderKind,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        provider: ProviderKind,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_magic() {
        assert_eq!(
            DeckFormat::from_magic(&[0x50, 0x4B, 0x03, 0x04, 0, 0, 0, 0]),
            Some(DeckFormat::Pptx)
        );
        assert_eq!(
            DeckFormat::from_magic(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
            Some(DeckFormat::Ppt)
        );
        assert_eq!(DeckFormat::from_magic(b"PK"), None);
        assert_eq!(DeckFormat::from_magic(b"%PDF-1.7"), None);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DeckFormat::from_extension("PPTX"), Some(DeckFormat::Pptx));
        assert_eq!(DeckFormat::from_extension("ppt"), Some(DeckFormat::Ppt));
        assert_eq!(DeckFormat::from_extension("key"), None);
    }

    #[test]
    fn test_provider_kind_tokens() {
        assert_eq!("google".parse::<ProviderKind>().unwrap(), ProviderKind::Google);
        assert_eq!("Web".parse::<ProviderKind>().unwrap(), ProviderKind::Google);
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("llm".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert!(matches!(
            "deepl".parse::<ProviderKind>(),
            Err(Error::UnknownProvider(name)) if name == "deepl"
        ));
        assert_eq!(ProviderKind::default(), ProviderKind::Google);
    }

    #[test]
    fn test_handle_ordering_follows_document_order() {
        let a = RunHandle { slide: 0, paragraph: 3, run: 5 };
        let b = RunHandle { slide: 1, paragraph: 0, run: 0 };
        assert!(a < b);
        assert_eq!(a.to_string(), "slide 1 paragraph 3 run 5");
    }
}
