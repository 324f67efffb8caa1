//! Implements ReportSinkPort. Uses the `csv` crate for safe serialization.
//!
//! Format: `user_id,total_messages,avg_score`, header always present.

use crate::domain::{DomainError, ReportRow};
use crate::ports::ReportSinkPort;
use std::path::Path;
use tokio::fs;
use tracing::info;

pub const REPORT_HEADER: [&str; 3] = ["user_id", "total_messages", "avg_score"];

pub struct CsvReportSink;

impl CsvReportSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReportSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ReportSinkPort for CsvReportSink {
    async fn write_report(&self, path: &Path, rows: &[ReportRow]) -> Result<(), DomainError> {
        let content = report_to_csv(rows)
            .map_err(|e| DomainError::Report(format!("Failed to generate CSV: {}", e)))?;
        fs::write(path, content)
            .await
            .map_err(|e| DomainError::Io(format!("write {}: {}", path.display(), e)))?;
        info!(path = %path.display(), rows = rows.len(), "report written");
        Ok(())
    }
}

/// Render report rows to a CSV string with header.
pub fn report_to_csv(rows: &[ReportRow]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    wtr.write_record(REPORT_HEADER)?;

    for row in rows {
        let total = row.total_messages.to_string();
        let avg = format!("{:.4}", row.avg_score);
        wtr.write_record([row.user_id.as_str(), total.as_str(), avg.as_str()])?;
    }

    wtr.flush()?;
    let bytes = wtr.into_inner().map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::Other,
            e.to_string(),
        ))
    })?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(user_id: &str, total_messages: u64, avg_score: f64) -> ReportRow {
        ReportRow {
            user_id: user_id.to_string(),
            total_messages,
            avg_score,
        }
    }

    #[test]
    fn test_report_to_csv_basic() {
        let csv = report_to_csv(&[row("user1", 5, 0.32), row("user2", 3, 0.41)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines,
            vec![
                "user_id,total_messages,avg_score",
                "user1,5,0.3200",
                "user2,3,0.4100"
            ]
        );
    }

    #[test]
    fn test_empty_report_keeps_header() {
        let csv = report_to_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "user_id,total_messages,avg_score");
    }

    #[test]
    fn test_user_id_with_comma_is_quoted() {
        let csv = report_to_csv(&[row("doe, jane", 1, 1.0)]).unwrap();
        assert!(csv.contains("\"doe, jane\",1,1.0000"));
    }

    #[tokio::test]
    async fn test_write_report_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        CsvReportSink::new()
            .write_report(&path, &[row("user1", 1, 0.5)])
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("user1,1,0.5000"));
    }
}
