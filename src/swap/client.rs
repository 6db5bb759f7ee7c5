//! HTTP client for the swap aggregator.
//!
//! # Responsibilities
//! - Fetch price quotes containing the executable transaction payload
//! - Surface the aggregator's validation reasons on failure

use std::time::Duration;

use url::Url;

use crate::observability::metrics;
use crate::swap::types::{AggregatorErrorBody, QuoteParams, SwapQuote};
use crate::upstream::{self, UpstreamError, UpstreamResult};

const QUOTE_FALLBACK_MESSAGE: &str = "Could not fetch quote from the swap aggregator";

/// Client for the swap aggregator API.
#[derive(Debug, Clone)]
pub struct AggregatorClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AggregatorClient {
    /// Create a new aggregator client.
    pub fn new(base_url: &str, timeout: Duration) -> UpstreamResult<Self> {
        let base_url: Url = base_url
            .parse()
            .map_err(|e| UpstreamError::Decode(format!("invalid aggregator base URL: {}", e)))?;
        let http = upstream::http_client(timeout)?;
        Ok(Self { http, base_url })
    }

    /// Fetch a firm quote for the given parameters.
    pub async fn quote(&self, params: &QuoteParams) -> UpstreamResult<SwapQuote> {
        let mut url = self.base_url.clone();
        url.set_path("/swap/v1/quote");
        url.query_pairs_mut()
            .append_pair("sellToken", &params.sell_token.to_string())
            .append_pair("buyToken", &params.buy_token.to_string())
            .append_pair("sellAmount", &params.sell_amount.to_string())
            .append_pair("takerAddress", &params.taker.to_string());

        let response = self.http.get(url).send().await?;
        let status = response.status();
        metrics::record_upstream("aggregator", status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "Quote request rejected");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: extract_quote_error(&body),
            });
        }

        Ok(response.json::<SwapQuote>().await?)
    }
}

/// Pull the first validation reason out of an aggregator error body.
pub(crate) fn extract_quote_error(body: &str) -> String {
    serde_json::from_str::<AggregatorErrorBody>(body)
        .ok()
        .and_then(|b| {
            b.validation_errors
                .into_iter()
                .find_map(|e| e.reason)
                .or(b.reason)
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| QUOTE_FALLBACK_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_quote_error_validation_reason() {
        let body = r#"{"validationErrors": [{"reason": "INSUFFICIENT_ASSET_LIQUIDITY"}]}"#;
        assert_eq!(extract_quote_error(body), "INSUFFICIENT_ASSET_LIQUIDITY");
    }

    #[test]
    fn test_extract_quote_error_top_level_reason() {
        let body = r#"{"reason": "Gas estimation failed"}"#;
        assert_eq!(extract_quote_error(body), "Gas estimation failed");
    }

    #[test]
    fn test_extract_quote_error_fallback() {
        assert_eq!(extract_quote_error("{}"), QUOTE_FALLBACK_MESSAGE);
        assert_eq!(extract_quote_error("<html>"), QUOTE_FALLBACK_MESSAGE);
    }
}
