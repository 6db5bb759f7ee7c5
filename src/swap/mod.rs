//! Token swap subsystem.
//!
//! # Data Flow
//! ```text
//! Amount/token edits
//!     → debounce.rs (quiet-window timer, one request per burst)
//!     → client.rs (aggregator quote fetch)
//!     → types.rs (SwapQuote with the exact transaction payload)
//!     → executor.rs (allowance check → approval → swap broadcast)
//! ```
//!
//! # Design Decisions
//! - A new input edit cancels the pending debounce timer, never an
//!   in-flight quote request
//! - The execution sequence has no retry or rollback: each step's failure
//!   aborts and surfaces, because broadcast transactions are not
//!   compensable by this client

pub mod client;
pub mod debounce;
pub mod executor;
pub mod types;

pub use client::AggregatorClient;
pub use debounce::QuoteDebouncer;
pub use executor::{ApprovalDecision, SwapError, SwapExecutor};
pub use types::{QuoteParams, SwapQuote, TokenInfo, NATIVE_ASSET};
