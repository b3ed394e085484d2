//! Stage 7's visual-integration wrapper (§9's open-question decision).
//!
//! Plain [`crate::stages::write`] always writes whatever is in
//! `doc.markdown`. This module sits in front of it when a visual
//! recognizer is configured: it drains the visual queue up to
//! `services.options.visual_drain_timeout`, merges results into the
//! markdown before writing if they arrive in time, and otherwise writes
//! un-merged markdown immediately and patches the file on disk once the
//! queue finishes in the background. Both paths go through
//! [`crate::visual::merge_into_markdown`], which is idempotent per
//! placeholder id, so a late overwrite can never double-apply a fragment.

use crate::services::Services;
use crate::stages;
use crate::visual::{self, VisualJob};
use docflow_core::{DocFlowError, Document};
use std::path::PathBuf;
use std::thread;

/// Runs stage 7 for `doc`, integrating `jobs` through `services`'
/// configured recognizer (if any) per the timing decision above. With no
/// recognizer configured, or no jobs to recognize, this is exactly
/// [`crate::stages::write`].
pub fn write(doc: &mut Document, jobs: Vec<VisualJob>, services: &Services) -> Result<Vec<PathBuf>, DocFlowError> {
    let Some(recognizer) = services.visual_recognizer.clone() else {
        return stages::write(doc, services);
    };
    if jobs.is_empty() {
        return stages::write(doc, services);
    }

    match visual::run_visual_queue_with_timeout(
        jobs,
        recognizer,
        services.options.workers,
        services.options.visual_drain_timeout,
    ) {
        Ok(fragments) => {
            doc.markdown = visual::merge_into_markdown(&doc.markdown, &fragments);
            stages::write(doc, services)
        }
        Err(receiver) => {
            tracing::warn!(
                path = %doc.source_path.display(),
                "visual queue did not drain within timeout, writing un-merged markdown"
            );
            let paths = stages::write(doc, services)?;
            spawn_late_patch(doc.markdown.clone(), receiver, paths.clone());
            Ok(paths)
        }
    }
}

/// Waits on the still-running visual queue from a detached thread and
/// overwrites the written markdown file once it finishes, reusing the
/// same background computation the timed-out wait was watching rather
/// than recognizing every job a second time. Best-effort: a write
/// failure here only logs, since stage 7 already reported success to
/// the caller.
fn spawn_late_patch(
    markdown_before: String,
    receiver: crossbeam_channel::Receiver<std::collections::HashMap<String, String>>,
    written_paths: Vec<PathBuf>,
) {
    let Some(markdown_path) = written_paths.into_iter().find(|p| p.extension().and_then(|e| e.to_str()) == Some("md")) else {
        return;
    };
    thread::spawn(move || {
        let Ok(fragments) = receiver.recv() else {
            return;
        };
        let merged = visual::merge_into_markdown(&markdown_before, &fragments);
        if let Err(e) = std::fs::write(&markdown_path, merged) {
            tracing::warn!(path = %markdown_path.display(), error = %e, "late visual patch failed to write");
        }
    });
}
