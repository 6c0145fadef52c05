//! Slide model: the shape tree plus the XML events it was built from.

use deck_core::{Error, Result, RunStyle};
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesText, Event};
use quick_xml::Writer;

/// A shape on a slide, as far as text is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// A shape with a text body (`p:sp` with `p:txBody`).
    Text { name: String, frame: TextFrame },
    /// A table (`p:graphicFrame` holding `a:tbl`), one frame per cell.
    Table {
        name: String,
        rows: Vec<Vec<TextFrame>>,
    },
    /// A group of shapes (`p:grpSp`). Groups nest.
    Group { name: String, shapes: Vec<Shape> },
    /// Pictures, connectors, charts, and shapes without text.
    Other { name: String },
}

impl Shape {
    /// The `cNvPr` name of the shape.
    pub fn name(&self) -> &str {
        match self {
            Shape::Text { name, .. }
            | Shape::Table { name, .. }
            | Shape::Group { name, .. }
            | Shape::Other { name } => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFrame {
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Paragraph ordinal within the slide.
    pub index: usize,
    /// Run ordinals within the slide, in reading order.
    pub runs: Vec<usize>,
}

/// Storage for one `a:r` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSlot {
    pub text: String,
    pub style: RunStyle,
    pub paragraph: usize,
    /// Indices of the text and CDATA events inside `a:t`, in order.
    pub(crate) text_events: Vec<usize>,
}

/// A parsed slide part.
#[derive(Debug, Clone)]
pub struct Slide {
    /// 1-based slide number.
    pub number: usize,

    /// Part name inside the package, e.g. `ppt/slides/slide1.xml`.
    pub path: String,

    pub(crate) shapes: Vec<Shape>,
    pub(crate) runs: Vec<RunSlot>,
    pub(crate) events: Vec<Event<'static>>,
    pub(crate) dirty: bool,
}

impl Slide {
    /// Top-level shapes in z-order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// All runs on the slide in document order, including empty ones.
    pub fn runs(&self) -> &[RunSlot] {
        &self.runs
    }

    /// Whether any run text has been replaced since loading.
    pub fn is_modified(&self) -> bool {
        self.dirty
    }

    /// Replace the text of one run.
    ///
    /// The replacement goes into the first text event of `a:t`; any later
    /// ones are emptied. `a:rPr` and everything around it stays as it was
    /// read.
    pub(crate) fn set_run_text(&mut self, run: usize, text: &str) -> Result<()> {
        let slot = self
            .runs
            .get_mut(run)
            .ok_or_else(|| Error::InvalidHandle(format!("slide {} has no run {}", self.number, run)))?;
        let (first, rest) = slot.text_events.split_first().ok_or_else(|| {
            Error::InvalidHandle(format!("run {} on slide {} has no text node", run, self.number))
        })?;

        if slot.text == text {
            return Ok(());
        }

        let escaped = partial_escape(text).into_owned();
        self.events[*first] = Event::Text(BytesText::from_escaped(escaped));
        for &index in rest {
            self.events[index] = Event::Text(BytesText::from_escaped(""));
        }
        slot.text = text.to_string();
        self.dirty = true;

        Ok(())
    }

    /// Serialize the slide back to XML.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        for event in &self.events {
            writer
                .write_event(event)
                .map_err(|e| Error::XmlError(format!("Failed to write {}: {}", self.path, e)))?;
        }

        Ok(writer.into_inner())
    }
}
