//! CLI tool for translating PowerPoint decks.

use anyhow::{Context, Result};
use clap::Parser;
use deck_cli::layout::{DEFAULT_ORIGINALS_DIR, DEFAULT_OUTPUT_DIR};
use deck_cli::{job, Granularity, Job, Layout, PipelineOptions};
use deck_core::ProviderKind;
use deck_providers::ProviderConfig;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Translate the text of a PowerPoint deck, keeping its formatting.
#[derive(Parser, Debug)]
#[command(name = "translate-deck")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:\n  translate-deck deck.pptx en es\n  translate-deck deck.pptx fr auto\n  translate-deck deck.pptx en es openai\n\nThe openai backend reads PROVIDER_API_KEY (or OPENAI_API_KEY) from the environment or a .env file.")]
struct Args {
    /// Input PowerPoint file (.pptx)
    input: PathBuf,

    /// Target language code (e.g. 'en')
    target_lang: String,

    /// Source language code, or 'auto' to detect it
    #[arg(default_value = "auto")]
    source_lang: String,

    /// Translation backend: 'google' (free) or 'openai'
    #[arg(default_value = "google")]
    provider: String,

    /// Folder the input is copied into
    #[arg(long, default_value = DEFAULT_ORIGINALS_DIR)]
    originals_dir: PathBuf,

    /// Folder translated decks are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Translate the input where it is, without copying it first
    #[arg(long)]
    no_stage: bool,

    /// Translate run by run, or a whole paragraph at a time
    #[arg(short, long, value_enum, default_value_t = Granularity::Run)]
    granularity: Granularity,

    /// Model for the openai backend
    #[arg(long)]
    model: Option<String>,

    /// Base URL of the translation backend
    #[arg(long)]
    base_url: Option<String>,

    /// Pause before each request, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Print a JSON report to stdout when done
    #[arg(long)]
    report: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match dotenvy::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
    }

    let kind: ProviderKind = args.provider.parse()?;
    let provider = provider_config(&args, kind);

    let job = Job {
        input: args.input.clone(),
        options: PipelineOptions::new(&args.source_lang, &args.target_lang)
            .with_granularity(args.granularity)
            .with_provider(kind),
        provider,
        layout: Layout::new(&args.originals_dir, &args.output_dir),
        stage_input: !args.no_stage,
    };

    eprintln!(
        "Translating '{}' from '{}' to '{}' using '{}'...",
        args.input.display(),
        args.source_lang,
        args.target_lang,
        kind
    );

    let mut bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    bar.set_message("Translating");

    let report = job::run(&job, &mut bar)
        .with_context(|| format!("Failed to translate {}", args.input.display()))?;

    if let Some(output) = &report.output {
        eprintln!("Translated deck saved as: {}", output.display());
    }
    if report.failed() > 0 {
        eprintln!(
            "Warning: {} of {} texts could not be translated and were left as they were",
            report.failed(),
            report.units
        );
    }

    if args.report {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    }

    Ok(())
}

/// Environment settings with command-line overrides on top.
fn provider_config(args: &Args, kind: ProviderKind) -> ProviderConfig {
    let mut config =
        ProviderConfig::from_env(kind).with_timeout(Duration::from_secs(args.timeout_secs));

    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(model) = &args.model {
        config = config.with_model(model);
    }
    if let Some(delay) = args.delay_ms {
        config = config.with_request_delay(Duration::from_millis(delay));
    }

    config
}
