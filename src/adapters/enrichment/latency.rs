//! Simulated network latency for the enrichment services.
//!
//! Applied explicitly on the cache-miss path; cache hits never sleep.

use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Uniform delay range, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    min_ms: u64,
    max_ms: u64,
}

impl LatencyProfile {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms,
            max_ms: max_ms.max(min_ms),
        }
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    pub fn sample(&self) -> Duration {
        if self.max_ms == 0 {
            return Duration::ZERO;
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }

    pub async fn delay(&self) {
        let pause = self.sample();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::new(50, 200)
    }
}

/// Run `work` after a delay drawn from `profile`.
pub async fn with_latency<T>(profile: LatencyProfile, work: impl Future<Output = T>) -> T {
    profile.delay().await;
    work.await
}
