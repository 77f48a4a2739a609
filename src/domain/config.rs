//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the Matrix account, the pools analytics key, aggregator
//! endpoints and system settings.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::domain::types::Aggregator;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub aggregators: AggregatorsConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
    #[serde(default)]
    pub pools: PoolsConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    /// Room that receives escalated errors and user feedback.
    #[serde(default)]
    pub operator_room: Option<String>,
}

/// Blocklytics pools API (liquidity and annualized returns).
#[derive(Debug, Deserialize, Clone)]
pub struct PoolsConfig {
    #[serde(default = "default_exchanges_url")]
    pub exchanges_url: String,
    #[serde(default = "default_returns_url")]
    pub returns_url: String,
    #[serde(default = "default_pools_site")]
    pub site: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_key_env: Option<String>, // e.g. "POOLS_KEY"
}

impl Default for PoolsConfig {
    fn default() -> Self {
        Self {
            exchanges_url: default_exchanges_url(),
            returns_url: default_returns_url(),
            site: default_pools_site(),
            api_key: None,
            api_key_env: None,
        }
    }
}

impl PoolsConfig {
    /// Resolves the API key, preferring the literal value over the env var.
    pub fn key(&self) -> Option<String> {
        self.api_key.clone().or_else(|| {
            self.api_key_env
                .as_ref()
                .and_then(|var| std::env::var(var).ok())
        })
    }
}

fn default_exchanges_url() -> String {
    "https://api.blocklytics.org/pools/v0/exchanges".to_string()
}
fn default_returns_url() -> String {
    "http://api.blocklytics.org/uniswap/v1/returns".to_string()
}
fn default_pools_site() -> String {
    "https://pools.fyi".to_string()
}

/// URLs for one aggregator backend.
#[derive(Debug, Deserialize, Clone)]
pub struct EndpointConfig {
    pub offer: String,
    #[serde(default)]
    pub tokens: Option<String>,
    pub site: String,
}

impl EndpointConfig {
    fn new(offer: &str, tokens: Option<&str>, site: &str) -> Self {
        Self {
            offer: offer.to_string(),
            tokens: tokens.map(str::to_string),
            site: site.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AggregatorsConfig {
    pub dexag: EndpointConfig,
    pub oneinch: EndpointConfig,
    pub paraswap: EndpointConfig,
    pub zerox: EndpointConfig,
}

impl Default for AggregatorsConfig {
    fn default() -> Self {
        Self {
            dexag: EndpointConfig::new("https://api-v2.dex.ag/price", None, "https://dex.ag"),
            oneinch: EndpointConfig::new(
                "https://api.1inch.exchange/v1.1/quote",
                Some("https://api.1inch.exchange/v1.1/tokens"),
                "https://1inch.exchange",
            ),
            paraswap: EndpointConfig::new(
                "https://paraswap.io/api/v1/prices/1",
                Some("https://paraswap.io/api/v1/tokens/1"),
                "https://paraswap.io",
            ),
            zerox: EndpointConfig::new(
                "https://api.0x.org/swap/v0/quote",
                Some("https://api.0x.org/swap/v0/tokens"),
                "https://0x.org",
            ),
        }
    }
}

impl AggregatorsConfig {
    pub fn endpoint(&self, aggregator: Aggregator) -> &EndpointConfig {
        match aggregator {
            Aggregator::DexAg => &self.dexag,
            Aggregator::OneInch => &self.oneinch,
            Aggregator::ParaSwap => &self.paraswap,
            Aggregator::ZeroX => &self.zerox,
        }
    }
}

/// System-level settings for the bot.
#[derive(Debug, Deserialize, Clone)]
pub struct SystemConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Per HTTP call, in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout: u64,
    #[serde(default = "default_prefix")]
    pub command_prefix: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            request_timeout: default_timeout(),
            command_prefix: default_prefix(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_prefix() -> String {
    ".".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_minimal_config_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "services:\n  matrix:\n    username: bot\n    password: secret\n    homeserver: https://matrix.example.org\n"
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.services.matrix.username, "bot");
        assert!(config.services.matrix.operator_room.is_none());
        assert_eq!(config.system.command_prefix, ".");
        assert_eq!(config.system.request_timeout, 30);
        assert_eq!(
            config.aggregators.endpoint(Aggregator::DexAg).offer,
            "https://api-v2.dex.ag/price"
        );
        assert!(config.aggregators.endpoint(Aggregator::DexAg).tokens.is_none());
    }

    #[test]
    fn test_aggregator_override_keeps_other_defaults() {
        let yaml = r#"
services:
  matrix:
    username: bot
    password: secret
    homeserver: https://matrix.example.org
    operator_room: "!ops:example.org"
  pools:
    api_key: abc
aggregators:
  zerox:
    offer: http://localhost:9000/quote
    tokens: http://localhost:9000/tokens
    site: http://localhost:9000
system:
  request_timeout: 5
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.aggregators.zerox.offer, "http://localhost:9000/quote");
        assert_eq!(config.aggregators.paraswap.site, "https://paraswap.io");
        assert_eq!(config.services.pools.key().as_deref(), Some("abc"));
        assert_eq!(config.system.request_timeout, 5);
        assert_eq!(config.system.data_dir, "data");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(AppConfig::load("/nonexistent/config.yaml").is_err());
    }
}
