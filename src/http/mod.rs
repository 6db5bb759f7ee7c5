//! HTTP gateway subsystem.
//!
//! # Data Flow
//! ```text
//! Client request
//!     → server.rs (Axum setup, middleware, metrics)
//!     → request.rs (request ID injection)
//!     → proxy.rs (param validation, credential injection, forward)
//!     → error.rs (normalized JSON error responses)
//!     → Relay upstream body to client
//! ```

pub mod error;
pub mod proxy;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::{Credentials, HttpServer};
