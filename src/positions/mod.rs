//! DeFi positions aggregator integration.
//!
//! # Responsibilities
//! - Query the positions aggregator with Basic auth built from the
//!   server-held API key
//! - Relay the upstream body verbatim for the gateway route
//! - Provide the display transform (dust filter + sort) for the CLI

use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::observability::metrics;
use crate::upstream::{self, UpstreamError, UpstreamResult};

/// Environment variable holding the positions API key.
pub const API_KEY_ENV_VAR: &str = "FOLIO_POSITIONS_API_KEY";

/// Positions below this USD value are hidden from the dashboard.
const DUST_THRESHOLD_USD: f64 = 1.0;

/// A DeFi position as reported by the aggregator.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default, rename = "balanceUSD")]
    pub balance_usd: f64,
    #[serde(default)]
    pub display_props: DisplayProps,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DisplayProps {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Client for the positions aggregator API.
#[derive(Debug, Clone)]
pub struct PositionsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PositionsClient {
    /// Create a new positions client.
    pub fn new(base_url: &str, timeout: Duration) -> UpstreamResult<Self> {
        let base_url: Url = base_url
            .parse()
            .map_err(|e| UpstreamError::Decode(format!("invalid positions base URL: {}", e)))?;
        let http = upstream::http_client(timeout)?;
        Ok(Self { http, base_url })
    }

    /// Fetch all positions for an address, relaying the body verbatim.
    pub async fn positions(&self, address: &str, key: &str) -> UpstreamResult<Value> {
        let mut url = self.base_url.clone();
        url.set_path("/v2/positions");
        url.query_pairs_mut().append_pair("addresses[]", address);

        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, basic_auth_header(key))
            .send()
            .await?;
        let status = response.status();
        metrics::record_upstream("positions", status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Positions API error");
            let reason = status.canonical_reason().unwrap_or("upstream error");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: format!("Failed to fetch data from the positions provider: {}", reason),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Build the `Basic` authorization header the aggregator expects:
/// base64 of `key:` (empty password).
pub fn basic_auth_header(key: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{}:", key));
    format!("Basic {}", encoded)
}

/// Display transform: drop dust positions and sort by USD value, descending.
pub fn displayable(mut positions: Vec<Position>) -> Vec<Position> {
    positions.retain(|p| p.balance_usd > DUST_THRESHOLD_USD);
    positions.sort_by(|a, b| {
        b.balance_usd
            .partial_cmp(&a.balance_usd)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(app: &str, usd: f64) -> Position {
        Position {
            key: Some(app.to_string()),
            app_id: Some(app.to_string()),
            app_name: Some(app.to_string()),
            balance_usd: usd,
            display_props: DisplayProps::default(),
        }
    }

    #[test]
    fn test_basic_auth_header() {
        // base64("secret:") == "c2VjcmV0Og=="
        assert_eq!(basic_auth_header("secret"), "Basic c2VjcmV0Og==");
    }

    #[test]
    fn test_displayable_filters_dust_and_sorts() {
        let positions = vec![
            position("small", 0.5),
            position("mid", 42.0),
            position("exactly-one", 1.0),
            position("big", 1000.0),
        ];
        let shown = displayable(positions);
        let names: Vec<_> = shown.iter().filter_map(|p| p.app_name.as_deref()).collect();
        assert_eq!(names, vec!["big", "mid"]);
    }

    #[test]
    fn test_position_deserializes_from_camel_case() {
        let json = r#"{
            "key": "k1",
            "appId": "aave-v3",
            "appName": "Aave V3",
            "balanceUSD": 12.34,
            "displayProps": {"label": "Supplied ETH", "images": ["https://img"]}
        }"#;
        let p: Position = serde_json::from_str(json).unwrap();
        assert_eq!(p.app_name.as_deref(), Some("Aave V3"));
        assert_eq!(p.balance_usd, 12.34);
        assert_eq!(p.display_props.label.as_deref(), Some("Supplied ETH"));
    }
}
