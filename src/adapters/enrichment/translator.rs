//! Simulated translation API. Implements TranslatorPort.
//!
//! "Translation" reverses the message by characters. Results are memoized in the
//! shared enrichment cache; only a miss pays the simulated latency.

use super::{
    CachedEnrichment, EnrichmentCache, LatencyProfile, TRANSLATE_NAMESPACE, cache_key, with_latency,
};
use crate::domain::DomainError;
use crate::ports::TranslatorPort;
use std::sync::Arc;
use tracing::debug;

pub struct ReverseTranslator {
    cache: Arc<EnrichmentCache>,
    latency: LatencyProfile,
}

impl ReverseTranslator {
    pub fn new(cache: Arc<EnrichmentCache>, latency: LatencyProfile) -> Self {
        Self { cache, latency }
    }
}

#[async_trait::async_trait]
impl TranslatorPort for ReverseTranslator {
    async fn translate(&self, message: &str) -> Result<String, DomainError> {
        let key = cache_key(TRANSLATE_NAMESPACE, message);
        let cached = self
            .cache
            .get_or_try_compute(&key, || {
                with_latency(self.latency, async {
                    debug!(len = message.len(), "translation cache miss");
                    Ok::<_, DomainError>(CachedEnrichment::Translation(reverse(message)))
                })
            })
            .await?;

        match cached {
            CachedEnrichment::Translation(text) => Ok(text),
            other => Err(DomainError::Translation(format!(
                "cache entry {} holds {:?}, expected a translation",
                key, other
            ))),
        }
    }
}

/// Character-reverse `message`. Empty in, empty out.
pub fn reverse(message: &str) -> String {
    message.chars().rev().collect()
}
