//! Typed models for the indexer API responses.
//!
//! Only the fields the dashboard renders are modeled; the gateway itself
//! relays indexer bodies verbatim, so unknown fields are tolerated
//! everywhere.

use serde::{Deserialize, Serialize};

/// Envelope of a balances_v2 response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BalancesResponse {
    pub data: BalancesData,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BalancesData {
    #[serde(default)]
    pub items: Vec<BalanceItem>,
}

/// A single token (or NFT contract) balance record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BalanceItem {
    #[serde(default)]
    pub contract_name: Option<String>,
    #[serde(default)]
    pub contract_ticker_symbol: Option<String>,
    #[serde(default)]
    pub contract_decimals: u8,
    /// Raw integer balance as a decimal string.
    #[serde(default)]
    pub balance: String,
    /// USD value of the position, when the indexer can price it.
    #[serde(default)]
    pub quote: Option<f64>,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Item kind as reported by the indexer ("cryptocurrency", "nft", ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub nft_data: Option<Vec<NftData>>,
}

/// NFT-specific payload nested in a balance item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NftData {
    #[serde(default)]
    pub external_data: Option<NftExternalData>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NftExternalData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Envelope of a transactions_v3 response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionsResponse {
    pub data: TransactionsData,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionsData {
    #[serde(default)]
    pub items: Vec<TransactionItem>,
}

/// A single historical transaction record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionItem {
    pub tx_hash: String,
    #[serde(default)]
    pub from_address: Option<String>,
    #[serde(default)]
    pub to_address: Option<String>,
    /// Native value transferred, raw integer as a decimal string.
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub block_signed_at: Option<String>,
    #[serde(default)]
    pub successful: bool,
}

/// Shape of the indexer's error body, used for message extraction.
#[derive(Debug, Deserialize)]
pub struct IndexerErrorBody {
    #[serde(default)]
    pub error_message: Option<String>,
}
