//! The bounded worker pool (§5). A collector thread enumerates the input
//! directory and feeds paths into a bounded channel; `options.workers`
//! worker threads each pull a path, run it through [`crate::run_pipeline`]
//! end-to-end, and send the finished `Document` back over a second
//! channel. The main thread only aggregates results into a [`BatchReport`]
//! and never touches the filesystem itself — the same reader-thread /
//! main-thread split `sg-core`'s `index_directory_pipelined` uses to
//! overlap I/O with CPU-bound work, adapted here to N workers instead of
//! one reader plus one consumer.

use crate::services::Services;
use chrono::{DateTime, Utc};
use docflow_core::{Document, Strategy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::thread;

const PATH_CHANNEL_CAPACITY: usize = 128;

/// Outcome of running one document through the pipeline: per-file
/// success, strategy, timings, entity counts, and errors, as required
/// by the batch report (§5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub source_path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
    pub strategy: Strategy,
    pub total_ms: f64,
    pub entity_count: usize,
    pub fact_count: usize,
}

impl DocumentOutcome {
    /// Builds an outcome from a finished `doc` and the `strategy` it ran
    /// under. `strategy` comes from the `Services`/`PipelineOptions` the
    /// document was processed with, not from `Document` itself — the
    /// document never records which strategy produced it.
    #[must_use = "returns the outcome, does not record anything"]
    pub fn from_document(doc: &Document, strategy: Strategy) -> Self {
        let total_ms = doc.processing_times.values().sum();
        let entity_count = doc
            .normalized_entities
            .as_ref()
            .map(|e| e.len())
            .unwrap_or(0);
        let fact_count = doc.semantic_facts.as_ref().map(|f| f.len()).unwrap_or(0);
        Self {
            source_path: doc.source_path.clone(),
            success: doc.success,
            error: doc.error.clone(),
            strategy,
            total_ms,
            entity_count,
            fact_count,
        }
    }
}

/// Aggregate statistics for a batch run, written to disk as
/// `processing_report_<timestamp>.json` (§5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_documents: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_ms: f64,
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Builds a one-document report, for the CLI's single-file path
    /// (where there's no batch to aggregate).
    #[must_use = "returns the single-document report, does not write it"]
    pub fn single(outcome: DocumentOutcome) -> Self {
        let now = Utc::now();
        Self::new(now, now, vec![outcome])
    }

    fn new(started_at: DateTime<Utc>, finished_at: DateTime<Utc>, outcomes: Vec<DocumentOutcome>) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.success).count();
        let failed = outcomes.len() - succeeded;
        let total_ms = outcomes.iter().map(|o| o.total_ms).sum();
        Self {
            started_at,
            finished_at,
            total_documents: outcomes.len(),
            succeeded,
            failed,
            total_ms,
            outcomes,
        }
    }

    /// Writes the report as pretty JSON to `<output_dir>/processing_report_<timestamp>.json`.
    pub fn write_to(&self, output_dir: &Path) -> Result<PathBuf, docflow_core::DocFlowError> {
        let name = format!(
            "processing_report_{}.json",
            self.finished_at.format("%Y%m%d_%H%M%S")
        );
        let dest = output_dir.join(name);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&dest, json)?;
        Ok(dest)
    }
}

/// Recursively collects every regular file under `root`, in directory-walk
/// order. Directory iteration errors are skipped rather than aborting the
/// whole batch, mirroring the convert stage's per-file failure isolation.
fn collect_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

/// Runs every file under `input_dir` through the full seven-stage
/// pipeline using `services.options.workers` worker threads, writes each
/// successful document via stage 7, and returns the aggregated report.
pub fn run_batch(input_dir: &Path, services: &Services) -> Result<BatchReport, docflow_core::DocFlowError> {
    let started_at = Utc::now();
    let files = collect_files(input_dir);

    if files.is_empty() {
        let finished_at = Utc::now();
        return Ok(BatchReport::new(started_at, finished_at, Vec::new()));
    }

    let worker_count = services.options.workers.max(1);
    let (path_tx, path_rx) = crossbeam_channel::bounded::<PathBuf>(PATH_CHANNEL_CAPACITY);
    let (result_tx, result_rx) = crossbeam_channel::unbounded::<DocumentOutcome>();

    thread::scope(|scope| {
        for _ in 0..worker_count {
            let path_rx = path_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for path in path_rx {
                    let mut doc = crate::run_pipeline_with_timeout(&path, services);
                    if doc.success {
                        if let Err(e) = crate::integrate::write(&mut doc, Vec::new(), services) {
                            tracing::warn!(path = %doc.source_path.display(), error = %e, "stage 7 write failed");
                        }
                    }
                    let _ = result_tx.send(DocumentOutcome::from_document(&doc, services.options.strategy));
                }
            });
        }
        drop(result_tx);

        scope.spawn(move || {
            for path in files {
                let _ = path_tx.send(path);
            }
        });

        let outcomes: Vec<DocumentOutcome> = result_rx.iter().collect();
        let finished_at = Utc::now();
        Ok(BatchReport::new(started_at, finished_at, outcomes))
    })
}
