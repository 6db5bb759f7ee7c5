//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy routes
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Resolve server-held credentials from the environment
//! - Serve with graceful shutdown

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http::proxy;
use crate::http::request::RequestIdLayer;
use crate::indexer::IndexerClient;
use crate::observability::metrics;
use crate::positions::PositionsClient;
use crate::upstream::UpstreamError;
use crate::{indexer, positions};

/// Server-held upstream credentials.
///
/// Keys live in the environment, never in the config file, so a deployed
/// config can be shipped to clients without leaking anything.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub indexer_api_key: Option<String>,
    pub positions_api_key: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment.
    ///
    /// Missing variables are not an error at startup; the affected routes
    /// answer with a configuration error instead.
    pub fn from_env() -> Self {
        Self {
            indexer_api_key: std::env::var(indexer::API_KEY_ENV_VAR).ok(),
            positions_api_key: std::env::var(positions::API_KEY_ENV_VAR).ok(),
        }
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub indexer: IndexerClient,
    pub positions: PositionsClient,
    pub credentials: Credentials,
}

/// HTTP server for the portfolio gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &GatewayConfig, credentials: Credentials) -> Result<Self, UpstreamError> {
        let upstream_timeout = Duration::from_secs(config.timeouts.upstream_secs);
        let state = AppState {
            indexer: IndexerClient::new(&config.indexer.base_url, upstream_timeout)?,
            positions: PositionsClient::new(&config.positions.base_url, upstream_timeout)?,
            credentials,
        };

        if state.credentials.indexer_api_key.is_none() {
            tracing::warn!(
                var = indexer::API_KEY_ENV_VAR,
                "Indexer API key not set; balance routes will fail"
            );
        }
        if state.credentials.positions_api_key.is_none() {
            tracing::warn!(
                var = positions::API_KEY_ENV_VAR,
                "Positions API key not set; positions route will fail"
            );
        }

        let router = Self::build_router(config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/balances", get(proxy::balances))
            .route("/api/nfts", get(proxy::nfts))
            .route("/api/transactions", get(proxy::transactions))
            .route("/api/positions", get(proxy::positions))
            .route("/health", get(health))
            .with_state(state)
            .layer(middleware::from_fn(track_request))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns when the shutdown signal fires and in-flight requests drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health() -> &'static str {
    "ok"
}

/// Per-request metrics middleware.
async fn track_request(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = req.uri().path().to_string();

    let response = next.run(req).await;

    metrics::record_request(&method, &route, response.status().as_u16(), start);
    response
}
