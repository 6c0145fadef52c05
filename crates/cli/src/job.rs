//! One translation job: validation, provider setup, folders, pipeline.

use crate::layout::Layout;
use crate::pipeline::{DeckPipeline, PipelineOptions, PipelineReport};
use crate::progress::Progress;
use deck_core::language::is_valid_code;
use deck_core::{DeckFormat, Error, Result};
use deck_providers::{build_translator, ProviderConfig};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    pub options: PipelineOptions,
    pub provider: ProviderConfig,
    pub layout: Layout,
    /// Copy the input into the originals folder before translating.
    pub stage_input: bool,
}

/// Run a job to completion.
///
/// The translator is built before any file is touched, so a missing
/// credential stops the job without creating anything.
pub fn run(job: &Job, progress: &mut dyn Progress) -> Result<PipelineReport> {
    for code in [&job.options.source_lang, &job.options.target_lang] {
        if !is_valid_code(code) {
            return Err(Error::InvalidConfig(format!("'{}' is not a language code", code)));
        }
    }

    let translator = build_translator(&job.provider)?;

    if !job.input.is_file() {
        return Err(Error::InputNotFound(job.input.clone()));
    }
    let extension = job
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    match DeckFormat::from_extension(extension) {
        Some(DeckFormat::Pptx) => {}
        Some(DeckFormat::Ppt) => {
            return Err(Error::UnsupportedFormat(format!(
                "{} is a legacy .ppt file; save it as .pptx first",
                job.input.display()
            )));
        }
        None => {
            return Err(Error::UnsupportedFormat(format!(
                "{} must be a PowerPoint presentation (.pptx)",
                job.input.display()
            )));
        }
    }

    let input = if job.stage_input {
        job.layout.stage_input(&job.input)?
    } else {
        job.input.clone()
    };

    log::info!(
        "Translating {} from '{}' to '{}' with {}",
        input.display(),
        job.options.source_lang,
        job.options.target_lang,
        translator.name()
    );

    let mut pipeline = DeckPipeline::load(&input, translator.as_ref(), job.options.clone())?;
    pipeline.process(progress)?;

    job.layout.prepare_output_dir()?;
    let target = &job.options.target_lang;
    let output = job.layout.available_output_path(&input, target);
    let fallback = job.layout.timestamped_output_path(&input, target);
    pipeline.save(&output, Some(&fallback))?;

    Ok(pipeline.report().clone())
}
