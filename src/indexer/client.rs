//! HTTP client for the balance/transaction indexer.
//!
//! # Responsibilities
//! - Build upstream URLs for balances, transactions and NFT queries
//! - Inject the server-held API key as a query parameter
//! - Relay upstream bodies verbatim; extract `error_message` on failure

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::indexer::types::IndexerErrorBody;
use crate::observability::metrics;
use crate::upstream::{self, UpstreamError, UpstreamResult};

/// Environment variable holding the indexer API key.
pub const API_KEY_ENV_VAR: &str = "FOLIO_INDEXER_API_KEY";

/// Client for the balance/transaction indexer API.
#[derive(Debug, Clone)]
pub struct IndexerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl IndexerClient {
    /// Create a new indexer client.
    pub fn new(base_url: &str, timeout: Duration) -> UpstreamResult<Self> {
        let base_url: Url = base_url
            .parse()
            .map_err(|e| UpstreamError::Decode(format!("invalid indexer base URL: {}", e)))?;
        let http = upstream::http_client(timeout)?;
        Ok(Self { http, base_url })
    }

    /// Fetch token balances for an address, relaying the body verbatim.
    ///
    /// `chain` is forwarded as the path segment exactly as supplied; the
    /// balances endpoint accepts numeric chain IDs and reports unsupported
    /// chains itself.
    pub async fn balances(&self, chain: &str, address: &str, key: &str) -> UpstreamResult<Value> {
        let url = self.build_url(chain, address, "balances_v2", key, false);
        self.fetch(url, "Failed to fetch balances from the indexer")
            .await
    }

    /// Fetch NFT balances for an address (balances query with `nft=true`).
    pub async fn nft_balances(
        &self,
        chain: &str,
        address: &str,
        key: &str,
    ) -> UpstreamResult<Value> {
        let url = self.build_url(chain, address, "balances_v2", key, true);
        self.fetch(url, "Failed to fetch NFT balances from the indexer")
            .await
    }

    /// Fetch transaction history for an address.
    ///
    /// `chain` must already be the indexer's chain-name slug (see
    /// [`crate::chains::indexer_chain_name`]).
    pub async fn transactions(
        &self,
        chain: &str,
        address: &str,
        key: &str,
    ) -> UpstreamResult<Value> {
        let url = self.build_url(chain, address, "transactions_v3", key, false);
        self.fetch(url, "Failed to fetch transactions from the indexer")
            .await
    }

    fn build_url(&self, chain: &str, address: &str, endpoint: &str, key: &str, nft: bool) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("/v1/{}/address/{}/{}/", chain, address, endpoint));
        url.query_pairs_mut().append_pair("key", key);
        if nft {
            url.query_pairs_mut().append_pair("nft", "true");
        }
        url
    }

    async fn fetch(&self, url: Url, fallback: &str) -> UpstreamResult<Value> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        metrics::record_upstream("indexer", status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Indexer API error");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: extract_error_message(&body, fallback),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Pull `error_message` out of an indexer error body, if there is one.
pub(crate) fn extract_error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<IndexerErrorBody>(body)
        .ok()
        .and_then(|b| b.error_message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_present() {
        let body = r#"{"error": true, "error_message": "Invalid address", "error_code": 400}"#;
        assert_eq!(extract_error_message(body, "fallback"), "Invalid address");
    }

    #[test]
    fn test_extract_error_message_missing_uses_fallback() {
        assert_eq!(extract_error_message("{}", "fallback"), "fallback");
        assert_eq!(extract_error_message("not json", "fallback"), "fallback");
        assert_eq!(
            extract_error_message(r#"{"error_message": ""}"#, "fallback"),
            "fallback"
        );
    }

    #[test]
    fn test_build_url_injects_key_and_nft_flag() {
        let client =
            IndexerClient::new("https://api.covalenthq.com", Duration::from_secs(5)).unwrap();
        let url = client.build_url("base-mainnet", "0xabc", "balances_v2", "secret", true);
        assert_eq!(url.path(), "/v1/base-mainnet/address/0xabc/balances_v2/");
        assert!(url.query().unwrap().contains("key=secret"));
        assert!(url.query().unwrap().contains("nft=true"));
    }
}
