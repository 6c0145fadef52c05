//! The loaded presentation: package plus parsed slides.

use crate::package::Package;
use crate::parser;
use crate::slide::{RunSlot, Slide};
use deck_core::{DeckFormat, Error, Result, RunHandle, RunStyle};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A PPTX deck held in memory for translation.
pub struct Deck {
    filename: String,
    package: Package,
    slides: Vec<Slide>,
}

impl Deck {
    /// Load a deck from a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");

        Self::from_bytes(bytes, filename)
    }

    /// Load a deck from the bytes of a `.pptx` file.
    pub fn from_bytes(bytes: Vec<u8>, filename: &str) -> Result<Self> {
        match DeckFormat::from_magic(&bytes) {
            Some(DeckFormat::Pptx) => {}
            Some(DeckFormat::Ppt) => {
                return Err(Error::UnsupportedFormat(format!(
                    "{} is a legacy .ppt file; save it as .pptx first",
                    filename
                )));
            }
            None => {
                return Err(Error::UnsupportedFormat(format!(
                    "{} is not a PowerPoint presentation",
                    filename
                )));
            }
        }

        let package = Package::from_bytes(bytes)?;
        let slide_paths = parser::slide_order(&package)?;

        let mut slides = Vec::with_capacity(slide_paths.len());
        for (idx, slide_path) in slide_paths.iter().enumerate() {
            let content = package.read_part(slide_path).map_err(|e| {
                Error::CorruptedFile(format!("slide {} is unreadable: {}", slide_path, e))
            })?;
            slides.push(parser::parse_slide(&content, slide_path, idx + 1)?);
        }

        log::info!("Loaded {} with {} slides", filename, slides.len());

        Ok(Self {
            filename: filename.to_string(),
            package,
            slides,
        })
    }

    /// Original filename (without path).
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Slides in presentation order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub(crate) fn slides_mut(&mut self) -> &mut [Slide] {
        &mut self.slides
    }

    fn slot(&self, handle: &RunHandle) -> Option<&RunSlot> {
        self.slides.get(handle.slide)?.runs.get(handle.run)
    }

    /// Current text of a run.
    pub fn run_text(&self, handle: &RunHandle) -> Option<&str> {
        self.slot(handle).map(|slot| slot.text.as_str())
    }

    /// Formatting of a run as it was loaded.
    pub fn run_style(&self, handle: &RunHandle) -> Option<&RunStyle> {
        self.slot(handle).map(|slot| &slot.style)
    }

    /// Serialize the deck. Only modified slides are re-encoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut replacements = BTreeMap::new();
        for slide in self.slides.iter().filter(|s| s.is_modified()) {
            replacements.insert(slide.path.clone(), slide.to_xml()?);
        }

        log::debug!(
            "Serializing {} ({} of {} slides modified)",
            self.filename,
            replacements.len(),
            self.slides.len()
        );

        self.package.write_with(&replacements)
    }

    /// Serialize the deck and write it to `path`.
    ///
    /// The whole file is built in memory first, so nothing is written if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;

        fs::write(path, bytes).map_err(|source| Error::OutputNotWritable {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Wrote {}", path.display());
        Ok(())
    }
}
