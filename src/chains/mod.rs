//! Chain registry and chain-id mapping.
//!
//! # Responsibilities
//! - Strongly-typed chain IDs
//! - Static metadata for the supported chains (display name, native asset)
//! - Total mapping from chain IDs to the indexer's chain-name slugs
//!
//! # Design Decisions
//! - The slug mapping is total: unknown chain IDs resolve to the Ethereum
//!   mainnet slug rather than an error, matching upstream behavior where the
//!   indexer treats Ethereum as the default chain

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static metadata for a supported chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainInfo {
    /// Numeric chain ID.
    pub id: u64,
    /// Human-readable chain name.
    pub name: &'static str,
    /// Symbol of the chain's native asset.
    pub native_symbol: &'static str,
    /// Decimals of the native asset.
    pub native_decimals: u8,
    /// Chain-name slug used by the indexer API.
    pub indexer_slug: &'static str,
}

/// Chains the dashboard supports.
pub const SUPPORTED_CHAINS: [ChainInfo; 4] = [
    ChainInfo {
        id: 1,
        name: "Ethereum",
        native_symbol: "ETH",
        native_decimals: 18,
        indexer_slug: "eth-mainnet",
    },
    ChainInfo {
        id: 8453,
        name: "Base",
        native_symbol: "ETH",
        native_decimals: 18,
        indexer_slug: "base-mainnet",
    },
    ChainInfo {
        id: 137,
        name: "Polygon",
        native_symbol: "MATIC",
        native_decimals: 18,
        indexer_slug: "polygon-mainnet",
    },
    ChainInfo {
        id: 42161,
        name: "Arbitrum",
        native_symbol: "ETH",
        native_decimals: 18,
        indexer_slug: "arbitrum-mainnet",
    },
];

/// Look up metadata for a supported chain.
pub fn chain_info(id: u64) -> Option<&'static ChainInfo> {
    SUPPORTED_CHAINS.iter().find(|c| c.id == id)
}

/// Map a chain ID to the indexer's chain-name slug.
///
/// Total function: unknown IDs fall back to Ethereum mainnet.
pub fn indexer_chain_name(id: u64) -> &'static str {
    chain_info(id).map(|c| c.indexer_slug).unwrap_or("eth-mainnet")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(8453u64);
        assert_eq!(chain_id.0, 8453);
        assert_eq!(u64::from(chain_id), 8453);
    }

    #[test]
    fn test_known_chain_slugs() {
        assert_eq!(indexer_chain_name(1), "eth-mainnet");
        assert_eq!(indexer_chain_name(8453), "base-mainnet");
        assert_eq!(indexer_chain_name(137), "polygon-mainnet");
        assert_eq!(indexer_chain_name(42161), "arbitrum-mainnet");
    }

    #[test]
    fn test_unknown_chain_falls_back_to_ethereum() {
        assert_eq!(indexer_chain_name(0), "eth-mainnet");
        assert_eq!(indexer_chain_name(999_999), "eth-mainnet");
    }

    #[test]
    fn test_chain_info_lookup() {
        let base = chain_info(8453).unwrap();
        assert_eq!(base.name, "Base");
        assert_eq!(base.native_decimals, 18);
        assert!(chain_info(2).is_none());
    }
}
