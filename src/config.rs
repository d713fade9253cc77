//! Configuration types for dof-fx

use crate::dof::{DofFetchConfig, DOF_ENDPOINTS, MAX_DATE_ATTEMPTS};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub banxico: BanxicoConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Resolution pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// Candidate DOF endpoints in preference order
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    /// Budget per fetch attempt in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Candidate dates tried before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Zone in which "today" is derived, fixed for the whole process
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Banxico cross-validation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BanxicoConfig {
    /// SIE API token; cross-validation is skipped entirely when unset
    #[serde(default)]
    pub token: Option<String>,

    /// Divergence alert threshold in percent
    #[serde(default = "default_divergence_threshold")]
    pub divergence_threshold_pct: Decimal,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_endpoints() -> Vec<String> {
    DOF_ENDPOINTS.iter().map(|s| s.to_string()).collect()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_max_attempts() -> u32 {
    MAX_DATE_ATTEMPTS
}
fn default_timezone() -> String {
    "America/Mexico_City".to_string()
}
fn default_divergence_threshold() -> Decimal {
    Decimal::new(10, 1) // 1.0%
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            timezone: default_timezone(),
        }
    }
}

impl Default for BanxicoConfig {
    fn default() -> Self {
        Self {
            token: None,
            divergence_threshold_pct: default_divergence_threshold(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl ResolverConfig {
    /// The configured time zone, parsed
    pub fn tz(&self) -> anyhow::Result<Tz> {
        self.timezone
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid timezone {:?}: {e}", self.timezone))
    }

    /// Fetcher settings derived from this section
    pub fn fetch_config(&self) -> DofFetchConfig {
        DofFetchConfig {
            endpoints: self.endpoints.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
