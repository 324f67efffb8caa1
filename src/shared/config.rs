//! Application configuration. Sandbox directory, batch deadline, simulated latency.

use serde::Deserialize;
use std::time::Duration;

/// Directory all input and output paths must resolve into.
pub const DEFAULT_BASE_DIR: &str = "data";

/// Global deadline for one batch (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Lower bound of the simulated external-call latency.
pub const DEFAULT_LATENCY_MIN_MS: u64 = 50;

/// Upper bound (inclusive) of the simulated external-call latency.
pub const DEFAULT_LATENCY_MAX_MS: u64 = 200;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Sandbox base directory. Read from CHAT_MODERATOR_BASE_DIR.
    #[serde(default)]
    pub base_dir: Option<String>,

    /// Batch deadline in seconds. Read from CHAT_MODERATOR_TIMEOUT_SECS.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Minimum simulated latency per cache miss. Read from CHAT_MODERATOR_LATENCY_MIN_MS.
    #[serde(default)]
    pub latency_min_ms: Option<u64>,

    /// Maximum simulated latency per cache miss. Read from CHAT_MODERATOR_LATENCY_MAX_MS.
    #[serde(default)]
    pub latency_max_ms: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("CHAT_MODERATOR_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        // Environment wins over the optional file
        c = c.add_source(config::Environment::with_prefix("CHAT_MODERATOR").try_parsing(true));
        c.build()?.try_deserialize()
    }

    pub fn base_dir_or_default(&self) -> String {
        self.base_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_DIR.to_string())
    }

    /// Returns the batch deadline. Defaults to 5 minutes.
    pub fn timeout_or_default(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Returns `(min, max)` latency in ms. A max below min is raised to min.
    pub fn latency_bounds_ms(&self) -> (u64, u64) {
        let min = self.latency_min_ms.unwrap_or(DEFAULT_LATENCY_MIN_MS);
        let max = self.latency_max_ms.unwrap_or(DEFAULT_LATENCY_MAX_MS);
        (min, max.max(min))
    }
}
