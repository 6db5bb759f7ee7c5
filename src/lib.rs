//! Portfolio gateway: a credential-injecting proxy and dashboard toolkit
//! for an EVM wallet portfolio.
//!
//! # Architecture Overview
//!
//! ```text
//! Dashboard CLI                     Gateway (folio-gateway)
//! ─────────────                     ───────────────────────
//! balances/nfts/txs/positions ────▶ http/ (axum routes)
//!                                      │ inject server-held API keys
//!                                      ▼
//!                                  indexer/  positions/   (reqwest clients)
//!                                      │
//!                                      ▼
//!                                  third-party data providers
//!
//! send/quote/swap ───▶ swap/ (aggregator quotes, debounce, execution)
//!                      blockchain/ (alloy RPC, wallet, transactions)
//!                           │
//!                           ▼
//!                      JSON-RPC endpoints (primary + failover)
//!
//! Cross-cutting: config/ (TOML), chains/ (chain registry),
//! observability/ (tracing + metrics), lifecycle/ (shutdown),
//! portfolio/ (display transforms)
//! ```
//!
//! API credentials live exclusively in environment variables and are
//! attached server-side; they never reach a client-visible surface.

pub mod blockchain;
pub mod chains;
pub mod config;
pub mod http;
pub mod indexer;
pub mod lifecycle;
pub mod observability;
pub mod portfolio;
pub mod positions;
pub mod swap;
pub mod upstream;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
