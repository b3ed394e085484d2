//! The visual-element queue (§4.8). Visual element recognition (figures,
//! tables, formulas, charts via vision models) is an explicit non-goal
//! of the core — this module only exposes the queue interface a real
//! recognizer plugs into, matching spec.md §6's collaborator boundary.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    Figure,
    Table,
    Formula,
    Chart,
}

/// One unit of visual-recognition work: a placeholder token already
/// present in the document's markdown, and the raw bytes to recognize.
#[derive(Debug, Clone)]
pub struct VisualJob {
    pub placeholder_id: String,
    pub kind: VisualKind,
    pub payload: Vec<u8>,
}

/// The collaborator the core does not implement. A real implementation
/// would call out to a vision model; [`NoopVisualRecognizer`] is the
/// built-in stand-in used when no recognizer is configured.
pub trait VisualRecognizer: Send + Sync {
    fn recognize(&self, job: &VisualJob) -> String;
}

/// Returns an empty fragment for every job, so the pipeline runs
/// end-to-end with visual recognition disabled or unconfigured.
pub struct NoopVisualRecognizer;

impl VisualRecognizer for NoopVisualRecognizer {
    fn recognize(&self, _job: &VisualJob) -> String {
        String::new()
    }
}

/// Runs `jobs` through `worker_count` threads pulling from a bounded
/// channel (capacity `2 * worker_count`, per §5's backpressure model),
/// each calling `recognizer`. Returns placeholder id → recognized
/// fragment; merging is a plain string replace, so re-running the same
/// job twice is idempotent by construction.
#[must_use = "returns the placeholder -> fragment map, does not mutate any document"]
pub fn run_visual_queue<R: VisualRecognizer + ?Sized + 'static>(
    jobs: Vec<VisualJob>,
    recognizer: Arc<R>,
    worker_count: usize,
) -> HashMap<String, String> {
    let worker_count = worker_count.max(1);
    let (job_tx, job_rx) = crossbeam_channel::bounded::<VisualJob>(worker_count * 2);
    let (result_tx, result_rx) = crossbeam_channel::unbounded::<(String, String)>();

    let workers: Vec<_> = (0..worker_count)
        .map(|_| {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let recognizer = Arc::clone(&recognizer);
            thread::spawn(move || {
                for job in job_rx {
                    let fragment = recognizer.recognize(&job);
                    let _ = result_tx.send((job.placeholder_id, fragment));
                }
            })
        })
        .collect();
    drop(result_tx);

    for job in jobs {
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    let results: HashMap<String, String> = result_rx.iter().collect();
    for worker in workers {
        let _ = worker.join();
    }
    results
}

/// Runs [`run_visual_queue`] on a background thread and waits at most
/// `timeout` for it to finish (§9's visual-element integration timing
/// decision). On timeout, the background computation is not abandoned —
/// its receiver is handed back in `Err` so a caller that fell back to
/// writing un-merged markdown can later block on the very same run
/// instead of recognizing everything a second time.
#[must_use = "on timeout the work keeps running in the background; use the returned receiver to collect it"]
pub fn run_visual_queue_with_timeout<R: VisualRecognizer + ?Sized + 'static>(
    jobs: Vec<VisualJob>,
    recognizer: Arc<R>,
    worker_count: usize,
    timeout: Duration,
) -> Result<HashMap<String, String>, crossbeam_channel::Receiver<HashMap<String, String>>> {
    let (done_tx, done_rx) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        let results = run_visual_queue(jobs, recognizer, worker_count);
        let _ = done_tx.send(results);
    });
    match done_rx.recv_timeout(timeout) {
        Ok(results) => Ok(results),
        Err(_) => Err(done_rx),
    }
}

/// Replace each `{{visual:<id>}}` placeholder in `markdown` with its
/// recognized fragment. Ids absent from `fragments` are left untouched.
#[must_use = "returns the merged markdown, does not mutate the input"]
pub fn merge_into_markdown(markdown: &str, fragments: &HashMap<String, String>) -> String {
    let mut merged = markdown.to_string();
    for (id, fragment) in fragments {
        let placeholder = format!("{{{{visual:{id}}}}}");
        merged = merged.replace(&placeholder, fragment);
    }
    merged
}
