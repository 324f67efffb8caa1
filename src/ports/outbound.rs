//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, InputRecord, ReportRow};
use std::path::Path;

/// Translation service. Deterministic for a given message within one run.
#[async_trait::async_trait]
pub trait TranslatorPort: Send + Sync {
    async fn translate(&self, message: &str) -> Result<String, DomainError>;
}

/// Scoring service. Returns a score in `[0.0, 1.0]`, deterministic per message.
#[async_trait::async_trait]
pub trait ScorerPort: Send + Sync {
    async fn score(&self, message: &str) -> Result<f64, DomainError>;
}

/// Record source. Reads and parses the input batch from an already validated path.
#[async_trait::async_trait]
pub trait RecordSourcePort: Send + Sync {
    async fn read_records(&self, path: &Path) -> Result<Vec<InputRecord>, DomainError>;
}

/// Report sink. Serializes the summary report to an already validated path.
#[async_trait::async_trait]
pub trait ReportSinkPort: Send + Sync {
    async fn write_report(&self, path: &Path, rows: &[ReportRow]) -> Result<(), DomainError>;
}
