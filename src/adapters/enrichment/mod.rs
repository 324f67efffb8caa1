//! Enrichment adapters. Simulated external translation and scoring APIs.
//!
//! Both share one [`EnrichmentCache`]; keys are namespaced so a translation and a
//! score for the same text never collide.

pub mod latency;
pub mod scorer;
pub mod translator;

pub use latency::{LatencyProfile, with_latency};
pub use scorer::HashScorer;
pub use translator::ReverseTranslator;

use crate::shared::MemoCache;

pub const TRANSLATE_NAMESPACE: &str = "translate";
pub const SCORE_NAMESPACE: &str = "score";

/// Value stored in the shared enrichment cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedEnrichment {
    Translation(String),
    Score(f64),
}

pub type EnrichmentCache = MemoCache<CachedEnrichment>;

/// Namespaced cache key, e.g. `translate<->hello`.
pub fn cache_key(namespace: &str, message: &str) -> String {
    format!("{}<->{}", namespace, message)
}
