//! Runtime configuration
//!
//! Defaults match the deployed backend; every field can be overridden
//! through `NETPLUS_*` environment variables (a `.env` file is honored).

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the settlement service
    pub settlement_base_url: String,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Country-code literal prefixed to phone numbers in deep links
    pub country_code: String,
    /// Thermal paper width in characters (58mm paper: 32)
    pub paper_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settlement_base_url: "https://receipt-system-zf7s.onrender.com".to_string(),
            request_timeout_secs: 15,
            country_code: "91".to_string(),
            paper_width: 32,
        }
    }
}

impl Config {
    /// Load configuration from the environment on top of the defaults
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            settlement_base_url: env_or("NETPLUS_SETTLEMENT_URL", defaults.settlement_base_url),
            request_timeout_secs: env_or("NETPLUS_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            country_code: env_or("NETPLUS_COUNTRY_CODE", defaults.country_code),
            paper_width: env_or("NETPLUS_PAPER_WIDTH", defaults.paper_width),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
