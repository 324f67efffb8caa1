//! Domain errors. Used by ports, use cases and the binary's exit mapping.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid usage: {0}")]
    Usage(String),

    /// Path resolves outside the sandbox base directory. Raised before any file is opened.
    #[error("Invalid file path: {0}")]
    PathSecurity(String),

    #[error("I/O error: {0}")]
    Io(String),

    /// Batch did not settle before the global deadline.
    #[error("Processing timed out after {elapsed_ms} ms ({pending} records still in flight)")]
    Timeout { elapsed_ms: u128, pending: usize },

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("Scoring failed: {0}")]
    Scoring(String),

    #[error("Report generation failed: {0}")]
    Report(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Short name of the stage that failed, for user-visible messages.
    pub fn stage(&self) -> &'static str {
        match self {
            DomainError::Usage(_) => "arguments",
            DomainError::PathSecurity(_) => "path validation",
            DomainError::Io(_) => "file I/O",
            DomainError::Timeout { .. } => "enrichment",
            DomainError::Translation(_) => "translation",
            DomainError::Scoring(_) => "scoring",
            DomainError::Report(_) => "report",
            DomainError::Internal(_) => "internal",
        }
    }
}
