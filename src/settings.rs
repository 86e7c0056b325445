// src/settings.rs

use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

const ENV_PREFIX: &str = "REVIEW_SCRAPER";
const DEFAULT_DELAY_MS: i64 = 2000;
const DEFAULT_TIMEOUT_SECS: i64 = 10;
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Runtime knobs. Defaults can be overridden with `REVIEW_SCRAPER_*` env vars,
/// e.g. `REVIEW_SCRAPER_DELAY_MS=500`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Pause between page fetches.
    pub delay_ms: u64,
    /// Per-fetch timeout.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS as u64,
            timeout_secs: DEFAULT_TIMEOUT_SECS as u64,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("delay_ms", DEFAULT_DELAY_MS)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
