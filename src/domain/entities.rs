//! Domain entities. Pure data structures for the moderation batch.
//!
//! No CSV/IO types here; adapters map into these.

/// One parsed input line: who wrote what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    pub user_id: String,
    pub message: String,
}

impl InputRecord {
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
        }
    }
}

/// Running per-user statistic. Mutated only through [`UserStats::add_message`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UserStats {
    total_messages: u64,
    score_sum: f64,
}

impl UserStats {
    pub fn new(total_messages: u64, score_sum: f64) -> Self {
        Self {
            total_messages,
            score_sum,
        }
    }

    /// Record one more successfully scored message.
    pub fn add_message(&mut self, score: f64) {
        self.total_messages += 1;
        self.score_sum += score;
    }

    pub fn total_messages(&self) -> u64 {
        self.total_messages
    }

    pub fn score_sum(&self) -> f64 {
        self.score_sum
    }

    /// `score_sum / total_messages`, or 0.0 when nothing was recorded.
    pub fn average_score(&self) -> f64 {
        if self.total_messages == 0 {
            return 0.0;
        }
        self.score_sum / self.total_messages as f64
    }
}

/// One output line of the summary report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub user_id: String,
    pub total_messages: u64,
    pub avg_score: f64,
}
