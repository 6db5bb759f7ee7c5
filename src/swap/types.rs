//! Swap quote and token types.

use alloy::primitives::{address, Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Pseudo-address the aggregator uses for a chain's native asset.
pub const NATIVE_ASSET: Address = address!("eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");

/// A token the swap form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
    pub symbol: &'static str,
    pub address: Address,
    pub decimals: u8,
}

/// Built-in token list for the default chain (Base mainnet).
pub const DEFAULT_TOKENS: [TokenInfo; 4] = [
    TokenInfo {
        symbol: "ETH",
        address: NATIVE_ASSET,
        decimals: 18,
    },
    TokenInfo {
        symbol: "USDC",
        address: address!("833589fcd6edb6e08f4c7c32d4f71b54bda02913"),
        decimals: 6,
    },
    TokenInfo {
        symbol: "DEGEN",
        address: address!("4ed4e862860bed51a9570b96d89af5e1b0efefed"),
        decimals: 18,
    },
    TokenInfo {
        symbol: "WETH",
        address: address!("4200000000000000000000000000000000000006"),
        decimals: 18,
    },
];

/// Look up a built-in token by its symbol, case-insensitively.
pub fn token_by_symbol(symbol: &str) -> Option<&'static TokenInfo> {
    DEFAULT_TOKENS
        .iter()
        .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
}

/// Parameters of a quote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteParams {
    pub sell_token: Address,
    pub buy_token: Address,
    /// Sell amount in the token's smallest unit.
    pub sell_amount: U256,
    /// Address that will execute the swap.
    pub taker: Address,
}

impl QuoteParams {
    /// Whether these inputs are worth quoting at all.
    ///
    /// Zero amounts and self-swaps clear the pending quote instead of
    /// issuing a request.
    pub fn is_quotable(&self) -> bool {
        !self.sell_amount.is_zero() && self.sell_token != self.buy_token
    }
}

/// A price quote from the swap aggregator.
///
/// Integer fields arrive as decimal strings and are kept that way; the
/// typed accessors parse on demand. The quote contains the exact
/// transaction payload to execute the trade.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    pub sell_amount: String,
    pub buy_amount: String,
    /// Contract that must be approved to pull the sell token.
    pub allowance_target: Address,
    /// Swap contract to send the transaction to.
    pub to: Address,
    /// Calldata for the swap transaction.
    pub data: Bytes,
    /// Native value to attach, as a decimal string.
    pub value: String,
    /// Gas limit suggested by the aggregator, as a decimal string.
    pub gas: String,
}

impl SwapQuote {
    /// Sell amount in the token's smallest unit.
    pub fn sell_amount_units(&self) -> Option<U256> {
        self.sell_amount.parse().ok()
    }

    /// Buy amount in the token's smallest unit.
    pub fn buy_amount_units(&self) -> Option<U256> {
        self.buy_amount.parse().ok()
    }

    /// Native value to attach to the swap transaction.
    pub fn value_wei(&self) -> Option<U256> {
        self.value.parse().ok()
    }

    /// Gas limit for the swap transaction.
    pub fn gas_limit(&self) -> Option<u64> {
        self.gas.parse().ok()
    }
}

/// Shape of the aggregator's error body, used for message extraction.
#[derive(Debug, Deserialize)]
pub struct AggregatorErrorBody {
    #[serde(default, rename = "validationErrors")]
    pub validation_errors: Vec<AggregatorValidationError>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AggregatorValidationError {
    #[serde(default)]
    pub reason: Option<String>,
}
