//! The translation pipeline: load, extract, translate, rewrite, save.

use crate::progress::Progress;
use deck_core::{Error, ProviderKind, Result, RunHandle, TextUnit, TranslationRequest, Translator};
use deck_pptx::Deck;
use serde::Serialize;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// How runs are grouped into translation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Granularity {
    /// One request per run; every run keeps its own style.
    #[default]
    Run,
    /// One request per paragraph; the result goes to the paragraph's first
    /// run and the other runs are emptied.
    Paragraph,
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub source_lang: String,
    pub target_lang: String,
    pub granularity: Granularity,
    /// Recorded on each request and on every failure in the report.
    pub provider: ProviderKind,
}

impl PipelineOptions {
    pub fn new(source_lang: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            granularity: Granularity::default(),
            provider: ProviderKind::default(),
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }
}

/// Pipeline stages, in the only order they can happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Loaded,
    Extracting,
    Translating,
    Rewriting,
    Saved,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Loaded => "loaded",
            Self::Extracting => "extracting",
            Self::Translating => "translating",
            Self::Rewriting => "rewriting",
            Self::Saved => "saved",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A unit whose translation failed and kept its original text.
#[derive(Debug, Clone, Serialize)]
pub struct FailedUnit {
    pub handle: RunHandle,
    pub text: String,
    pub provider: ProviderKind,
    pub error: String,
}

/// Summary of one pipeline pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub output: Option<PathBuf>,
    pub slides: usize,
    /// Translation requests made.
    pub units: usize,
    /// Units whose text was replaced.
    pub translated: usize,
    /// Units the backend returned unchanged.
    pub unchanged: usize,
    pub failures: Vec<FailedUnit>,
}

impl PipelineReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Runs of one translation request.
#[derive(Debug)]
struct Unit {
    handles: Vec<RunHandle>,
    text: String,
}

/// Drives a single deck through the translation stages.
///
/// The deck is owned for the whole pass and written once, at the end.
pub struct DeckPipeline<'t> {
    deck: Deck,
    translator: &'t dyn Translator,
    options: PipelineOptions,
    state: PipelineState,
    report: PipelineReport,
}

impl<'t> DeckPipeline<'t> {
    /// Wrap an already loaded deck.
    pub fn new(deck: Deck, translator: &'t dyn Translator, options: PipelineOptions) -> Self {
        let report = PipelineReport {
            slides: deck.slides().len(),
            ..PipelineReport::default()
        };

        Self {
            deck,
            translator,
            options,
            state: PipelineState::Loaded,
            report,
        }
    }

    /// Load the deck at `input`.
    pub fn load(
        input: &Path,
        translator: &'t dyn Translator,
        options: PipelineOptions,
    ) -> Result<Self> {
        let deck = Deck::open(input)?;
        Ok(Self::new(deck, translator, options))
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn report(&self) -> &PipelineReport {
        &self.report
    }

    /// Run every stage and write the result to `output`.
    pub fn run(&mut self, output: &Path, progress: &mut dyn Progress) -> Result<PipelineReport> {
        self.process(progress)?;
        self.save(output, None)?;
        Ok(self.report.clone())
    }

    /// Extract, translate, and rewrite, leaving the deck ready to save.
    pub fn process(&mut self, progress: &mut dyn Progress) -> Result<()> {
        self.transition(PipelineState::Loaded, PipelineState::Extracting)?;
        let units = self.extract();

        self.transition(PipelineState::Extracting, PipelineState::Translating)?;
        let outcomes = self.translate(&units, progress);

        self.transition(PipelineState::Translating, PipelineState::Rewriting)?;
        if let Err(e) = self.rewrite(&units, outcomes) {
            self.state = PipelineState::Failed;
            return Err(e);
        }

        log::info!(
            "Translated {} of {} units ({} unchanged, {} failed)",
            self.report.translated,
            self.report.units,
            self.report.unchanged,
            self.report.failed()
        );
        Ok(())
    }

    /// Write the deck to `output`.
    ///
    /// If `output` is refused with a permission error and a `fallback` is
    /// given, the deck is written there instead. Returns the path written.
    pub fn save(&mut self, output: &Path, fallback: Option<&Path>) -> Result<PathBuf> {
        if self.state != PipelineState::Rewriting {
            return Err(self.invalid_transition(PipelineState::Saved));
        }

        let written = match self.deck.save(output) {
            Ok(()) => Ok(output.to_path_buf()),
            Err(Error::OutputNotWritable { source, .. })
                if source.kind() == ErrorKind::PermissionDenied && fallback.is_some() =>
            {
                let fallback = fallback.unwrap_or(output);
                log::warn!(
                    "Cannot write {} ({}), using {} instead",
                    output.display(),
                    source,
                    fallback.display()
                );
                self.deck.save(fallback).map(|()| fallback.to_path_buf())
            }
            Err(e) => Err(e),
        };

        match written {
            Ok(path) => {
                self.state = PipelineState::Saved;
                self.report.output = Some(path.clone());
                Ok(path)
            }
            Err(e) => {
                self.state = PipelineState::Failed;
                Err(e)
            }
        }
    }

    fn transition(&mut self, from: PipelineState, to: PipelineState) -> Result<()> {
        if self.state != from {
            return Err(self.invalid_transition(to));
        }
        log::debug!("Pipeline {} -> {}", self.state, to);
        self.state = to;
        Ok(())
    }

    fn invalid_transition(&self, next: PipelineState) -> Error {
        Error::InvalidTransition {
            current: self.state.to_string(),
            next: next.to_string(),
        }
    }

    fn extract(&self) -> Vec<Unit> {
        let runs: Vec<TextUnit> = self.deck.text_units().collect();
        log::debug!("Extracted {} runs from {}", runs.len(), self.deck.filename());

        match self.options.granularity {
            Granularity::Run => runs
                .into_iter()
                .map(|unit| Unit {
                    handles: vec![unit.handle],
                    text: unit.text,
                })
                .collect(),
            Granularity::Paragraph => group_by_paragraph(runs),
        }
    }

    fn translate(&mut self, units: &[Unit], progress: &mut dyn Progress) -> Vec<Option<String>> {
        self.report.units = units.len();
        progress.start(units.len());

        let mut outcomes = Vec::with_capacity(units.len());
        for unit in units {
            let request = TranslationRequest::new(
                unit.text.as_str(),
                self.options.source_lang.as_str(),
                self.options.target_lang.as_str(),
                self.options.provider,
            );

            let outcome = match self.translator.translate_request(&request) {
                Ok(translated) => Some(translated),
                Err(e) => {
                    log::warn!(
                        "Keeping original text at {} ({:?}), {} failed: {}",
                        unit.handles[0],
                        unit.text,
                        request.provider,
                        e
                    );
                    self.report.failures.push(FailedUnit {
                        handle: unit.handles[0],
                        text: unit.text.clone(),
                        provider: request.provider,
                        error: e.to_string(),
                    });
                    None
                }
            };

            outcomes.push(outcome);
            progress.advance();
        }

        progress.finish();
        outcomes
    }

    fn rewrite(&mut self, units: &[Unit], outcomes: Vec<Option<String>>) -> Result<()> {
        for (unit, outcome) in units.iter().zip(outcomes) {
            let Some(translated) = outcome else {
                continue;
            };

            if translated == unit.text {
                self.report.unchanged += 1;
                continue;
            }

            let (first, rest) = unit
                .handles
                .split_first()
                .ok_or_else(|| Error::InvalidHandle("empty translation unit".to_string()))?;
            self.deck.rewrite(first, &translated)?;
            for handle in rest {
                self.deck.rewrite(handle, "")?;
            }
            self.report.translated += 1;
        }

        Ok(())
    }
}

/// Join consecutive runs of the same paragraph into one unit.
fn group_by_paragraph(runs: Vec<TextUnit>) -> Vec<Unit> {
    let mut units: Vec<Unit> = Vec::new();

    for run in runs {
        match units.last_mut() {
            Some(unit)
                if unit.handles[0].slide == run.handle.slide
                    && unit.handles[0].paragraph == run.handle.paragraph =>
            {
                unit.handles.push(run.handle);
                unit.text.push_str(&run.text);
            }
            _ => units.push(Unit {
                handles: vec![run.handle],
                text: run.text,
            }),
        }
    }

    units
}
