//! Credential-injecting proxy routes.
//!
//! # Responsibilities
//! - Validate query parameters before touching any credential
//! - Inject server-held API keys into upstream requests
//! - Relay upstream bodies and error statuses back to the client
//!
//! # Design Decisions
//! - Parameter validation runs before the credential check, so a request
//!   missing both gets a 400 rather than exposing configuration state
//! - The balances and NFT routes forward the client-supplied chainId
//!   verbatim; the indexer accepts numeric IDs there and reports
//!   unsupported chains itself. Only the transactions endpoint requires
//!   the chain-name slug, so only that route maps through the table

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::chains;
use crate::http::error::ApiError;
use crate::http::server::AppState;

const MISSING_ADDRESS_AND_CHAIN: &str = "Address and chainId are required";
const MISSING_ADDRESS: &str = "Address parameter is required";
const INDEXER_KEY_MISSING: &str = "Server configuration error: API key not found.";
const POSITIONS_KEY_MISSING: &str = "Server configuration error";

/// Query parameters for the indexer-backed routes.
#[derive(Debug, Deserialize)]
pub struct IndexerQuery {
    pub address: Option<String>,
    #[serde(rename = "chainId")]
    pub chain_id: Option<String>,
}

/// Query parameters for the positions route.
#[derive(Debug, Deserialize)]
pub struct PositionsQuery {
    pub address: Option<String>,
}

struct IndexerRequest<'a> {
    address: String,
    chain_id: String,
    key: &'a str,
}

/// Shared validation for the three indexer routes.
fn validate_indexer(state: &AppState, query: IndexerQuery) -> Result<IndexerRequest<'_>, ApiError> {
    let (Some(address), Some(chain_id)) = (query.address, query.chain_id) else {
        return Err(ApiError::MissingParam(MISSING_ADDRESS_AND_CHAIN));
    };
    let key = state
        .credentials
        .indexer_api_key
        .as_deref()
        .ok_or(ApiError::Configuration(INDEXER_KEY_MISSING))?;

    Ok(IndexerRequest {
        address,
        chain_id,
        key,
    })
}

/// GET /api/balances?address=&chainId=
pub async fn balances(
    State(state): State<AppState>,
    Query(query): Query<IndexerQuery>,
) -> Result<Json<Value>, ApiError> {
    let req = validate_indexer(&state, query)?;
    let body = state
        .indexer
        .balances(&req.chain_id, &req.address, req.key)
        .await?;
    Ok(Json(body))
}

/// GET /api/nfts?address=&chainId=
pub async fn nfts(
    State(state): State<AppState>,
    Query(query): Query<IndexerQuery>,
) -> Result<Json<Value>, ApiError> {
    let req = validate_indexer(&state, query)?;
    let body = state
        .indexer
        .nft_balances(&req.chain_id, &req.address, req.key)
        .await?;
    Ok(Json(body))
}

/// GET /api/transactions?address=&chainId=
pub async fn transactions(
    State(state): State<AppState>,
    Query(query): Query<IndexerQuery>,
) -> Result<Json<Value>, ApiError> {
    let req = validate_indexer(&state, query)?;
    // Unparseable chain IDs resolve to the default chain, like unknown ones
    let slug = chains::indexer_chain_name(req.chain_id.parse().unwrap_or(0));
    let body = state
        .indexer
        .transactions(slug, &req.address, req.key)
        .await?;
    Ok(Json(body))
}

/// GET /api/positions?address=
pub async fn positions(
    State(state): State<AppState>,
    Query(query): Query<PositionsQuery>,
) -> Result<Json<Value>, ApiError> {
    let address = query
        .address
        .ok_or(ApiError::MissingParam(MISSING_ADDRESS))?;
    let key = state
        .credentials
        .positions_api_key
        .as_deref()
        .ok_or(ApiError::Configuration(POSITIONS_KEY_MISSING))?;

    let body = state.positions.positions(&address, key).await?;
    Ok(Json(body))
}
