//! Implements RecordSourcePort over a `user_id,message` text file.
//!
//! Messages are frequently not quoted even when they contain commas, so each line is
//! split on its FIRST comma only; a strict CSV reader would split those messages apart.

use crate::domain::{DomainError, InputRecord};
use crate::ports::RecordSourcePort;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

pub struct CsvRecordSource;

impl CsvRecordSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvRecordSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RecordSourcePort for CsvRecordSource {
    async fn read_records(&self, path: &Path) -> Result<Vec<InputRecord>, DomainError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::Io(format!("read {}: {}", path.display(), e)))?;
        let records = parse_records(&content);
        info!(path = %path.display(), records = records.len(), "input parsed");
        Ok(records)
    }
}

/// Parse a whole input file: header skipped, blank user ids dropped.
pub fn parse_records(content: &str) -> Vec<InputRecord> {
    content
        .lines()
        .skip(1)
        .filter_map(|line| {
            let record = parse_line(line);
            if record.user_id.is_empty() {
                debug!(line, "dropping line without user id");
                return None;
            }
            Some(record)
        })
        .collect()
}

/// Split on the first comma; strip one pair of surrounding quotes from the message.
pub fn parse_line(line: &str) -> InputRecord {
    let Some((user_id, rest)) = line.split_once(',') else {
        return InputRecord::new(line.trim(), "");
    };
    let mut message = rest.trim();
    if message.len() > 1 && message.starts_with('"') && message.ends_with('"') {
        message = &message[1..message.len() - 1];
    }
    InputRecord::new(user_id.trim(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_file() {
        let content = "user_id,message\nuser1,Hello world\nuser2,Test message";
        let records = parse_records(content);

        assert_eq!(
            records,
            vec![
                InputRecord::new("user1", "Hello world"),
                InputRecord::new("user2", "Test message"),
            ]
        );
    }

    #[test]
    fn test_unquoted_commas_stay_in_message() {
        let r = parse_line("user_7,Let's discuss A, B, and C.");
        assert_eq!(r, InputRecord::new("user_7", "Let's discuss A, B, and C."));
    }

    #[test]
    fn test_outer_quotes_stripped_once() {
        let r = parse_line("u1, \"This message, containing a comma\" ");
        assert_eq!(r.message, "This message, containing a comma");

        let r = parse_line("u1,\"\"quoted twice\"\"");
        assert_eq!(r.message, "\"quoted twice\"");

        // A lone quote is not a pair
        assert_eq!(parse_line("u1,\"").message, "\"");
    }

    #[test]
    fn test_edge_lines() {
        assert_eq!(parse_line("lonely"), InputRecord::new("lonely", ""));
        assert_eq!(parse_line("u1,"), InputRecord::new("u1", ""));

        let records = parse_records("user_id,message\n\n ,orphan\n,also orphan\nu2,kept\r\n");
        assert_eq!(records, vec![InputRecord::new("u2", "kept")]);
    }

    #[test]
    fn test_header_only() {
        assert!(parse_records("user_id,message\n").is_empty());
        assert!(parse_records("").is_empty());
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvRecordSource::new()
            .read_records(&dir.path().join("nope.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Io(_)));
    }
}
