//! Balance/transaction indexer integration.
//!
//! # Data Flow
//! ```text
//! Gateway proxy handlers
//!     → client.rs (URL construction, key injection, error relay)
//!     → indexer API (balances_v2, transactions_v3, NFT balances)
//!
//! CLI dashboard
//!     → gateway proxy routes
//!     → types.rs (typed deserialization of relayed responses)
//! ```
//!
//! # Security Constraints
//! - The API key is injected server-side only; it never appears in
//!   responses, logs, or client-visible configuration

pub mod client;
pub mod types;

pub use client::{IndexerClient, API_KEY_ENV_VAR};
pub use types::{BalanceItem, BalancesResponse, TransactionItem, TransactionsResponse};
