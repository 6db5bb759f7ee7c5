//! Integration tests for the swap aggregator client.

use std::net::SocketAddr;
use std::time::Duration;

use alloy::primitives::{Address, U256};

use folio_gateway::swap::client::AggregatorClient;
use folio_gateway::swap::types::{token_by_symbol, QuoteParams, NATIVE_ASSET};
use folio_gateway::upstream::UpstreamError;

mod common;

fn quote_params(sell_amount: u64) -> QuoteParams {
    QuoteParams {
        sell_token: NATIVE_ASSET,
        buy_token: token_by_symbol("USDC").unwrap().address,
        sell_amount: U256::from(sell_amount),
        taker: Address::ZERO,
    }
}

#[tokio::test]
async fn test_quote_request_carries_params_and_parses_response() {
    let upstream: SocketAddr = "127.0.0.1:28421".parse().unwrap();
    let body = r#"{
        "sellAmount": "1000000000000000000",
        "buyAmount": "2461000000",
        "allowanceTarget": "0xdef1c0ded9bec7f1a1670819833240f027b25eff",
        "to": "0xdef1c0ded9bec7f1a1670819833240f027b25eff",
        "data": "0xdeadbeef",
        "value": "1000000000000000000",
        "gas": "250000"
    }"#;
    let seen = common::start_recording_upstream(upstream, 200, body).await;

    let client =
        AggregatorClient::new(&format!("http://{}", upstream), Duration::from_secs(5)).unwrap();
    let quote = client
        .quote(&quote_params(1_000_000_000_000_000_000))
        .await
        .unwrap();

    assert_eq!(
        quote.sell_amount_units().unwrap(),
        U256::from(1_000_000_000_000_000_000u64)
    );
    assert_eq!(quote.buy_amount_units().unwrap(), U256::from(2_461_000_000u64));
    assert_eq!(quote.gas_limit().unwrap(), 250_000);
    assert_eq!(quote.data.len(), 4);

    let heads = seen.lock().unwrap();
    assert!(heads[0].contains("/swap/v1/quote"));
    assert!(heads[0].contains("sellToken=0x"));
    assert!(heads[0].contains("buyToken=0x"));
    assert!(heads[0].contains("sellAmount=1000000000000000000"));
    assert!(heads[0].contains("takerAddress=0x"));
}

#[tokio::test]
async fn test_quote_validation_error_reason_is_surfaced() {
    let upstream: SocketAddr = "127.0.0.1:28422".parse().unwrap();
    common::start_mock_upstream(
        upstream,
        400,
        r#"{"code": 100, "reason": "Validation Failed", "validationErrors": [{"field": "sellAmount", "reason": "INSUFFICIENT_ASSET_LIQUIDITY"}]}"#,
    )
    .await;

    let client =
        AggregatorClient::new(&format!("http://{}", upstream), Duration::from_secs(5)).unwrap();
    let err = client.quote(&quote_params(1)).await.unwrap_err();

    match err {
        UpstreamError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "INSUFFICIENT_ASSET_LIQUIDITY");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_quote_error_without_details_uses_fallback_message() {
    let upstream: SocketAddr = "127.0.0.1:28423".parse().unwrap();
    common::start_mock_upstream(upstream, 500, "oops").await;

    let client =
        AggregatorClient::new(&format!("http://{}", upstream), Duration::from_secs(5)).unwrap();
    let err = client.quote(&quote_params(1)).await.unwrap_err();

    match err {
        UpstreamError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Could not fetch quote from the swap aggregator");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
