//! Wallet configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use nautilus_types::{Network, ProtocolParams, MIN_BOX_VALUE, NATIVE_DECIMALS};
use nautilus_utils::LogFormat;

use crate::change_address::ChangePolicy;
use crate::error::WalletError;

/// Configuration for one wallet.
///
/// Can be loaded from a TOML file via [`WalletConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Network addresses are encoded for and validated against.
    #[serde(default)]
    pub network: Network,

    /// Send change to a fresh address instead of the default one.
    #[serde(default)]
    pub avoid_address_reuse: bool,

    /// Derivation index of the default change address.
    #[serde(default)]
    pub default_change_index: u32,

    /// Minimum native value of any output, in nanoErg.
    #[serde(default = "default_min_box_value")]
    pub min_box_value: u64,

    /// Items requested per indexer page.
    #[serde(default = "default_explorer_page_size")]
    pub explorer_page_size: usize,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_min_box_value() -> u64 {
    MIN_BOX_VALUE
}

fn default_explorer_page_size() -> usize {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl WalletConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| WalletError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        toml::from_str(s).map_err(|e| WalletError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, WalletError> {
        toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn protocol_params(&self) -> ProtocolParams {
        ProtocolParams {
            min_box_value: self.min_box_value,
            native_decimals: NATIVE_DECIMALS,
        }
    }

    pub fn change_policy(&self) -> ChangePolicy {
        ChangePolicy {
            avoid_address_reuse: self.avoid_address_reuse,
            default_change_index: self.default_change_index,
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            avoid_address_reuse: false,
            default_change_index: 0,
            min_box_value: default_min_box_value(),
            explorer_page_size: default_explorer_page_size(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = WalletConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = WalletConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = WalletConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.min_box_value, 1_000_000);
        assert_eq!(config.explorer_page_size, 500);
        assert_eq!(config.log_format, LogFormat::Human);
        assert!(!config.avoid_address_reuse);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            network = "testnet"
            avoid_address_reuse = true
            default_change_index = 3
            log_format = "json"
        "#;
        let config = WalletConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(
            config.change_policy(),
            ChangePolicy {
                avoid_address_reuse: true,
                default_change_index: 3
            }
        );
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn protocol_params_follow_min_box_value() {
        let config = WalletConfig::from_toml_str("min_box_value = 20").unwrap();
        assert_eq!(config.protocol_params().min_box_value, 20);
        assert_eq!(config.protocol_params().native_decimals, 9);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = WalletConfig::from_toml_str("network = 5").unwrap_err();
        assert!(matches!(err, WalletError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "network = \"testnet\"").unwrap();
        let config = WalletConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.network, Network::Testnet);
        assert!(WalletConfig::from_toml_file("/nonexistent/nautilus.toml").is_err());
    }
}
