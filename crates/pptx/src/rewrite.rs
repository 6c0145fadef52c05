//! In-place run rewriting.

use crate::deck::Deck;
use deck_core::{Error, Result, RunHandle};

impl Deck {
    /// Replace the text of the run at `handle`.
    ///
    /// Only the run's text node is touched. Its `a:rPr` (font, size, weight,
    /// slant, color) is left exactly as loaded.
    pub fn rewrite(&mut self, handle: &RunHandle, text: &str) -> Result<()> {
        let slide = self
            .slides_mut()
            .get_mut(handle.slide)
            .ok_or_else(|| Error::InvalidHandle(format!("no slide for {}", handle)))?;

        let belongs = slide
            .runs()
            .get(handle.run)
            .is_some_and(|slot| slot.paragraph == handle.paragraph);
        if !belongs {
            return Err(Error::InvalidHandle(format!("no run at {}", handle)));
        }

        slide.set_run_text(handle.run, text)
    }
}
