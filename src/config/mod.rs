//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - API credentials are never part of the file; they come from
//!   environment variables read at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::BlockchainConfig;
pub use schema::GatewayConfig;
pub use schema::IndexerConfig;
pub use schema::PositionsConfig;
pub use schema::SwapConfig;
