//! Error types for the document processing pipeline.
//!
//! Variants mirror the error-kind table of the pipeline's error handling
//! design: each kind carries its own severity and propagation policy, from
//! `Skip` (not a failure) up to `Fatal` (aborts pool construction).

use thiserror::Error;

/// Error types that can occur while running the document pipeline.
///
/// Only [`DocFlowError::Fatal`] is expected to terminate the process; every
/// other variant is carried on a [`crate::document::Document`] and reported
/// in the batch report rather than propagated as a panic.
///
/// # Examples
///
/// ```
/// use docflow_core::{DocFlowError, Result};
///
/// fn decode(path: &str) -> Result<String> {
///     if path.is_empty() {
///         return Err(DocFlowError::DecodeFailure("empty path".to_string()));
///     }
///     Ok(path.to_string())
/// }
///
/// match decode("") {
///     Err(DocFlowError::DecodeFailure(msg)) => assert_eq!(msg, "empty path"),
///     _ => panic!("expected DecodeFailure"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum DocFlowError {
    /// Unsupported extension or empty file. Not counted as a failure.
    #[error("skip: {0}")]
    Skip(String),

    /// Stage 1 decoder collaborator returned an error.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// Pattern engine runtime error on one specific pattern.
    #[error("recognizer failure ({pattern}): {message}")]
    RecognizerFailure {
        /// Name of the pattern that failed.
        pattern: String,
        /// Underlying error message.
        message: String,
    },

    /// Stage 2–6 failed unexpectedly.
    #[error("stage failure at {stage}: {message}")]
    StageFailure {
        /// Name of the stage that failed (`process`, `classify`, `extract`, `normalize`, `semantic`).
        stage: String,
        /// Underlying error message.
        message: String,
    },

    /// Stage 7 could not write output, even after one retry.
    #[error("write failure: {0}")]
    WriteFailure(String),

    /// Corpus file unreadable at startup, or a pattern fails the
    /// finite-automaton compile constraint. Aborts pool construction.
    #[error("fatal: {0}")]
    Fatal(String),

    /// File I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Regex compilation error, surfaced as fatal at pattern-catalog load time.
    #[error("pattern compile error: {0}")]
    PatternCompile(#[from] regex::Error),
}

/// Type alias for [`Result<T, DocFlowError>`].
pub type Result<T> = std::result::Result<T, DocFlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_display() {
        let err = DocFlowError::Skip("unsupported extension .xyz".to_string());
        assert_eq!(format!("{err}"), "skip: unsupported extension .xyz");
    }

    #[test]
    fn test_decode_failure_display() {
        let err = DocFlowError::DecodeFailure("pdf parser crashed".to_string());
        assert_eq!(format!("{err}"), "decode failure: pdf parser crashed");
    }

    #[test]
    fn test_recognizer_failure_display() {
        let err = DocFlowError::RecognizerFailure {
            pattern: "MONEY".to_string(),
            message: "catastrophic backtracking guard tripped".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("MONEY"));
        assert!(msg.contains("backtracking"));
    }

    #[test]
    fn test_stage_failure_display() {
        let err = DocFlowError::StageFailure {
            stage: "classify".to_string(),
            message: "keyword file missing".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "stage failure at classify: keyword file missing"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DocFlowError = io_err.into();
        match err {
            DocFlowError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
        let err: DocFlowError = json_err.into();
        assert!(matches!(err, DocFlowError::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn ok() -> Result<u32> {
            Ok(7)
        }
        fn fail() -> Result<u32> {
            Err(DocFlowError::Fatal("corpus file missing".to_string()))
        }
        assert_eq!(ok().unwrap(), 7);
        assert!(fail().is_err());
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<()> {
            Err(DocFlowError::WriteFailure("disk full".to_string()))
        }
        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }
        match outer() {
            Err(DocFlowError::WriteFailure(msg)) => assert_eq!(msg, "disk full"),
            _ => panic!("expected WriteFailure to propagate"),
        }
    }

    #[test]
    fn test_error_debug_format() {
        let err = DocFlowError::Fatal("pattern rejected: lookahead not allowed".to_string());
        let debug = format!("{err:?}");
        assert!(debug.contains("Fatal"));
    }

    #[test]
    fn test_error_size_stays_small() {
        assert!(std::mem::size_of::<DocFlowError>() < 256);
    }
}
