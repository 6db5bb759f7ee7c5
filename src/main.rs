//! Portfolio gateway server binary.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use folio_gateway::config::loader;
use folio_gateway::http::{Credentials, HttpServer};
use folio_gateway::observability::{logging, metrics};
use folio_gateway::Shutdown;

#[derive(Debug, Parser)]
#[command(name = "folio-gateway", about = "Credential-injecting portfolio gateway")]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = loader::load_or_default(args.config.as_deref())?;
    logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        indexer = %config.indexer.base_url,
        positions = %config.positions.base_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(&config, Credentials::from_env())?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
