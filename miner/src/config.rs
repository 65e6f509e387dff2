//! Miner configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use aegis_types::Netuid;

use crate::MinerError;

/// Configuration for an Aegis miner.
///
/// Can be loaded from a TOML file via [`MinerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). All fields are fixed at
/// startup; nothing here changes while the loop runs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MinerConfig {
    /// The subnet this miner is registered on.
    #[serde(default = "default_netuid")]
    pub netuid: Netuid,

    /// Whether the (deprecated) weight submission path is enabled.
    #[serde(default)]
    pub set_weights: bool,

    /// Whether to emit per-field metrics to the telemetry sink.
    #[serde(default)]
    pub telemetry_enabled: bool,

    /// Minimum stake a validator must hold for its requests to be served.
    /// Consumed by the request-handling layer, carried through config only.
    #[serde(default = "default_validator_min_stake")]
    pub validator_min_stake: f64,

    /// URL of the remotely maintained hotkey blacklist.
    #[serde(default = "default_blacklist_url")]
    pub blacklist_url: String,

    /// Directory for log output (miner log and telemetry file).
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pause between loop ticks, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Whether to expose Prometheus metrics over HTTP.
    #[serde(default)]
    pub enable_metrics: bool,

    /// Metrics endpoint port (if enabled).
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_netuid() -> Netuid {
    Netuid::new(14)
}

fn default_validator_min_stake() -> f64 {
    20_000.0
}

fn default_blacklist_url() -> String {
    "https://raw.githubusercontent.com/aegis-subnet/registry/main/blacklist.json".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("/var/log/aegis")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_metrics_port() -> u16 {
    9100
}

// ── Impl ───────────────────────────────────────────────────────────────

impl MinerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, MinerError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| MinerError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, MinerError> {
        toml::from_str(s).map_err(|e| MinerError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("MinerConfig is always serializable to TOML")
    }
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            netuid: default_netuid(),
            set_weights: false,
            telemetry_enabled: false,
            validator_min_stake: default_validator_min_stake(),
            blacklist_url: default_blacklist_url(),
            log_dir: default_log_dir(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            tick_interval_ms: default_tick_interval_ms(),
            enable_metrics: false,
            metrics_port: default_metrics_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = MinerConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = MinerConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.netuid, config.netuid);
        assert_eq!(parsed.tick_interval_ms, config.tick_interval_ms);
        assert_eq!(parsed.validator_min_stake, config.validator_min_stake);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = MinerConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.netuid, Netuid::new(14));
        assert!(!config.set_weights);
        assert!(!config.telemetry_enabled);
        assert_eq!(config.validator_min_stake, 20_000.0);
        assert_eq!(config.log_format, "human");
        assert_eq!(config.tick_interval_ms, 1000);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            netuid = 3
            set_weights = true
            tick_interval_ms = 250
        "#;
        let config = MinerConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.netuid, Netuid::new(3));
        assert!(config.set_weights);
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = MinerConfig::from_toml_file("/nonexistent/aegis.toml");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, MinerError::Config(_)));
    }
}
