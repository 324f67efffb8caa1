//! Per-user aggregate store. Concurrent map user_id -> UserStats.
//!
//! Insert-or-update runs under the DashMap entry lock for that user's shard, so two
//! updates for one user never race and updates for users on other shards never wait.
//! Once sealed (report snapshot taken) further writes are dropped.

use crate::domain::UserStats;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

#[derive(Default)]
pub struct UserStatsStore {
    stats: DashMap<String, UserStats>,
    sealed: AtomicBool,
}

impl UserStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one scored message for `user_id`. Returns false if the store is sealed.
    pub fn add_scored_message(&self, user_id: &str, score: f64) -> bool {
        if self.sealed.load(Ordering::Acquire) {
            debug!(user_id, "store sealed, dropping late update");
            return false;
        }
        self.stats
            .entry(user_id.to_string())
            .and_modify(|s| s.add_message(score))
            .or_insert_with(|| UserStats::new(1, score));
        true
    }

    /// Average score of `user_id`, 0.0 when unknown.
    pub fn average_of(&self, user_id: &str) -> f64 {
        self.stats
            .get(user_id)
            .map(|s| s.average_score())
            .unwrap_or(0.0)
    }

    pub fn get(&self, user_id: &str) -> Option<UserStats> {
        self.stats.get(user_id).map(|s| *s.value())
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Stop accepting writes.
    pub fn seal(&self) {
        self.sealed.store(true, Ordering::Release);
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Seal and copy out every (user_id, stats) pair. The copy never changes afterwards.
    pub fn seal_and_snapshot(&self) -> Vec<(String, UserStats)> {
        self.seal();
        self.stats
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
