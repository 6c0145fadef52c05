//! Input and output folder conventions.
//!
//! Inputs are copied into an originals folder and results are written to a
//! sibling output folder as `<stem>_translated_<lang>.pptx`.

use deck_core::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_ORIGINALS_DIR: &str = "originals";
pub const DEFAULT_OUTPUT_DIR: &str = "translated";

#[derive(Debug, Clone)]
pub struct Layout {
    pub originals_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGINALS_DIR, DEFAULT_OUTPUT_DIR)
    }
}

impl Layout {
    pub fn new(originals_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            originals_dir: originals_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Copy `input` into the originals folder, unless it is already there.
    ///
    /// Returns the path to translate from.
    pub fn stage_input(&self, input: &Path) -> Result<PathBuf> {
        fs::create_dir_all(&self.originals_dir)?;

        let originals = fs::canonicalize(&self.originals_dir)?;
        let parent = input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        if fs::canonicalize(parent)? == originals {
            return Ok(input.to_path_buf());
        }

        let file_name = input
            .file_name()
            .ok_or_else(|| Error::InvalidConfig(format!("{} is not a file", input.display())))?;
        let staged = self.originals_dir.join(file_name);
        fs::copy(input, &staged)?;

        log::info!("Copied {} to {}", input.display(), staged.display());
        Ok(staged)
    }

    /// Create the output folder.
    pub fn prepare_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|source| Error::OutputNotWritable {
            path: self.output_dir.clone(),
            source,
        })
    }

    /// `<output_dir>/<stem>_translated_<lang>.pptx`
    pub fn output_path(&self, input: &Path, target_lang: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_translated_{}.pptx", file_stem(input), target_lang))
    }

    /// Like [`Layout::output_path`] with a Unix timestamp suffix.
    pub fn timestamped_output_path(&self, input: &Path, target_lang: &str) -> PathBuf {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        self.output_dir.join(format!(
            "{}_translated_{}_{}.pptx",
            file_stem(input),
            target_lang,
            secs
        ))
    }

    /// The output path to use: the regular one, or the timestamped one if
    /// the regular file exists and is locked.
    pub fn available_output_path(&self, input: &Path, target_lang: &str) -> PathBuf {
        let path = self.output_path(input, target_lang);
        if is_locked(&path) {
            let alternative = self.timestamped_output_path(input, target_lang);
            log::warn!(
                "{} is in use, writing {} instead",
                path.display(),
                alternative.display()
            );
            return alternative;
        }
        path
    }
}

fn file_stem(path: &Path) -> &str {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
}

/// An existing file that cannot be opened for writing.
fn is_locked(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }
    matches!(
        OpenOptions::new().append(true).open(path),
        Err(e) if e.kind() == ErrorKind::PermissionDenied
    )
}
