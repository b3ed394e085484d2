//! Thin CLI wrapper around `docflow-pipeline` (§6). This crate owns
//! argument parsing and process exit codes only — every pipeline
//! decision (decoding, extraction, normalization, fact generation,
//! writing) lives in `docflow-pipeline` and the crates underneath it.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use docflow_core::Strategy;
use docflow_pipeline::{BatchReport, PipelineOptions, Services};
use std::path::PathBuf;

/// Convert a directory (or single file) of documents into Markdown,
/// normalized entities, and semantic facts.
#[derive(Debug, Parser)]
#[command(name = "docflow", version, about)]
pub struct Cli {
    /// File or directory to process.
    pub input: PathBuf,

    /// Directory written Markdown, JSON sidecars, and the batch report go
    /// into. Defaults to the `OUTPUT_DIR` environment variable, falling
    /// back to `./output`.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Worker thread count. Defaults to the host's core count.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Skip the visual-element queue entirely.
    #[arg(long)]
    pub no_visual: bool,

    /// Skip table recognition jobs in the visual queue.
    #[arg(long)]
    pub no_tables: bool,

    /// Skip image/figure recognition jobs in the visual queue.
    #[arg(long)]
    pub no_images: bool,

    /// Skip stage 3 classification tagging.
    #[arg(long)]
    pub no_tagging: bool,

    /// Conversion strategy: fast, vlm, or hybrid.
    #[arg(long, value_enum, default_value_t = CliStrategy::Fast)]
    pub strategy: CliStrategy,

    /// Decode and process text only; never enqueue visual jobs.
    #[arg(long)]
    pub text_only: bool,

    /// Per-document timeout in seconds. 0 disables the timeout.
    #[arg(long, default_value_t = 0)]
    pub timeout: u64,

    /// Exit non-zero if any document fails.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliStrategy {
    Fast,
    Vlm,
    Hybrid,
}

impl From<CliStrategy> for Strategy {
    fn from(value: CliStrategy) -> Self {
        match value {
            CliStrategy::Fast => Self::Fast,
            CliStrategy::Vlm => Self::Vlm,
            CliStrategy::Hybrid => Self::Hybrid,
        }
    }
}

fn resolve_output_dir(cli: &Cli) -> PathBuf {
    cli.output_dir
        .clone()
        .or_else(|| std::env::var_os("OUTPUT_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("./output"))
}

fn pipeline_options(cli: &Cli) -> PipelineOptions {
    let mut options = PipelineOptions::default();
    if let Some(workers) = cli.workers {
        options.workers = workers.max(1);
    }
    options.strategy = cli.strategy.into();
    options.skip_visual = cli.no_visual || cli.text_only;
    options.skip_tables = cli.no_tables;
    options.skip_images = cli.no_images;
    options.skip_tagging = cli.no_tagging;
    options.text_only = cli.text_only;
    options.strict = cli.strict;
    options.timeout = (cli.timeout > 0).then(|| std::time::Duration::from_secs(cli.timeout));
    options
}

/// Runs one document or a whole directory through the pipeline and
/// writes the batch report, returning it for the caller to inspect (the
/// binary uses it to pick an exit code).
pub fn run(cli: &Cli) -> Result<BatchReport> {
    let output_dir = resolve_output_dir(cli);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let options = pipeline_options(cli);
    let services = Services::from_defaults(output_dir.as_path(), options)
        .context("building pipeline services from built-in defaults")?;

    let report = if cli.input.is_dir() {
        docflow_pipeline::pool::run_batch(&cli.input, &services).context("running batch")?
    } else {
        let mut doc = docflow_pipeline::run_pipeline_with_timeout(&cli.input, &services);
        if doc.success {
            docflow_pipeline::integrate::write(&mut doc, Vec::new(), &services)
                .context("writing document output")?;
        }
        let outcome = docflow_pipeline::DocumentOutcome::from_document(&doc, options.strategy);
        BatchReport::single(outcome)
    };

    report.write_to(&output_dir).context("writing batch report")?;
    Ok(report)
}
