//! Report builder. Final aggregate snapshot -> report rows, sorted by user id.

use crate::domain::{ReportRow, UserStats};

pub fn build_report(snapshot: Vec<(String, UserStats)>) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = snapshot
        .into_iter()
        .map(|(user_id, stats)| ReportRow {
            user_id,
            total_messages: stats.total_messages(),
            avg_score: stats.average_score(),
        })
        .collect();
    rows.sort_by(|a, b| a.user_id.cmp(&b.user_id));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_sorted_with_averages() {
        let rows = build_report(vec![
            ("user2".to_string(), UserStats::new(2, 1.0)),
            ("user1".to_string(), UserStats::new(3, 12.0)),
        ]);

        assert_eq!(
            rows,
            vec![
                ReportRow {
                    user_id: "user1".to_string(),
                    total_messages: 3,
                    avg_score: 4.0
                },
                ReportRow {
                    user_id: "user2".to_string(),
                    total_messages: 2,
                    avg_score: 0.5
                },
            ]
        );
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(build_report(Vec::new()).is_empty());
    }
}
