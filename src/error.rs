// Error types for screenshot capture and report generation

use std::path::PathBuf;
use thiserror::Error;

/// Why a screenshot or page-source snapshot could not be captured.
///
/// Never propagated past the step listener: it is logged and the artifact
/// reference is left empty.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("screen source unavailable: {0}")]
    Unavailable(String),

    #[error("failed to save artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure surfaced by the report service.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A reporter could not write its report; the rest of the batch was abandoned.
    #[error("failed to generate reports using {reporter} for '{outcome}': {source}")]
    GenerationFailed {
        reporter: String,
        outcome: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no reporter registered for format '{0}'")]
    UnknownFormat(String),
}

impl ReportError {
    /// Name of the reporter that failed, if any.
    pub fn reporter(&self) -> Option<&str> {
        match self {
            ReportError::GenerationFailed { reporter, .. } => Some(reporter),
            ReportError::UnknownFormat(_) => None,
        }
    }

    /// Title of the outcome being reported when the failure happened, if any.
    pub fn outcome(&self) -> Option<&str> {
        match self {
            ReportError::GenerationFailed { outcome, .. } => Some(outcome),
            ReportError::UnknownFormat(_) => None,
        }
    }
}
