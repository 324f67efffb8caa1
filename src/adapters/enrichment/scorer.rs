//! Simulated offensive-content scoring API. Implements ScorerPort.

use super::{
    CachedEnrichment, EnrichmentCache, LatencyProfile, SCORE_NAMESPACE, cache_key, with_latency,
};
use crate::domain::DomainError;
use crate::ports::ScorerPort;
use std::sync::Arc;
use tracing::debug;

/// Scores are `|h mod 1001| / 1000`, i.e. three decimal places in `[0.0, 1.0]`.
const SCORE_BUCKETS: i32 = 1001;

pub struct HashScorer {
    cache: Arc<EnrichmentCache>,
    latency: LatencyProfile,
}

impl HashScorer {
    pub fn new(cache: Arc<EnrichmentCache>, latency: LatencyProfile) -> Self {
        Self { cache, latency }
    }
}

#[async_trait::async_trait]
impl ScorerPort for HashScorer {
    async fn score(&self, message: &str) -> Result<f64, DomainError> {
        let key = cache_key(SCORE_NAMESPACE, message);
        let cached = self
            .cache
            .get_or_try_compute(&key, || {
                with_latency(self.latency, async {
                    debug!(len = message.len(), "score cache miss");
                    Ok::<_, DomainError>(CachedEnrichment::Score(stable_score(message)))
                })
            })
            .await?;

        match cached {
            CachedEnrichment::Score(score) => Ok(score),
            other => Err(DomainError::Scoring(format!(
                "cache entry {} holds {:?}, expected a score",
                key, other
            ))),
        }
    }
}

/// Deterministic score of `message` in `[0.0, 1.0]`.
pub fn stable_score(message: &str) -> f64 {
    let bucket = (stable_hash(message) % SCORE_BUCKETS).abs();
    f64::from(bucket) / 1000.0
}

/// 31-multiplier polynomial hash over UTF-16 code units, wrapping at 32 bits.
/// Stable across runs and platforms, unlike `std::hash`.
fn stable_hash(message: &str) -> i32 {
    message
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}
