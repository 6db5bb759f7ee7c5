//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the portfolio gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Balance/transaction indexer settings.
    pub indexer: IndexerConfig,

    /// DeFi positions aggregator settings.
    pub positions: PositionsConfig,

    /// Swap aggregator settings.
    pub swap: SwapConfig,

    /// Blockchain RPC settings for send/swap execution.
    pub blockchain: BlockchainConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Timeout for calls to third-party HTTP providers in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_secs: 15,
        }
    }
}

/// Balance/transaction indexer configuration.
///
/// The API key is intentionally absent here: it is read from the
/// `FOLIO_INDEXER_API_KEY` environment variable so it never lands in a
/// client-visible file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Base URL of the indexer API.
    pub base_url: String,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.covalenthq.com".to_string(),
        }
    }
}

/// DeFi positions aggregator configuration.
///
/// The API key comes from `FOLIO_POSITIONS_API_KEY`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PositionsConfig {
    /// Base URL of the positions API.
    pub base_url: String,
}

impl Default for PositionsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.zapper.xyz".to_string(),
        }
    }
}

/// Swap aggregator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SwapConfig {
    /// Base URL of the swap aggregator API for the active chain.
    pub aggregator_url: String,

    /// Quiet period for debounced quote refresh, in milliseconds.
    pub quiet_period_ms: u64,

    /// Maximum time to wait for an approval or swap confirmation, in seconds.
    pub confirmation_timeout_secs: u64,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            aggregator_url: "https://base.api.0x.org".to_string(),
            quiet_period_ms: 500,
            confirmation_timeout_secs: 120,
        }
    }
}

/// Blockchain RPC configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// Chain ID (e.g., 8453 for Base mainnet).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required for finality.
    pub confirmation_blocks: u32,

    /// Gas price multiplier (1.0 = estimated, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://mainnet.base.org".to_string(),
            failover_urls: Vec::new(),
            chain_id: 8453,
            rpc_timeout_secs: 10,
            confirmation_blocks: 2,
            gas_price_multiplier: 1.2,
            max_gas_price_gwei: 500,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.swap.quiet_period_ms, 500);
        assert_eq!(config.blockchain.chain_id, 8453);
    }

    #[test]
    fn test_minimal_toml_parses() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9999"
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");
        // Everything else falls back to defaults
        assert_eq!(config.indexer.base_url, "https://api.covalenthq.com");
        assert_eq!(config.timeouts.upstream_secs, 15);
    }
}
