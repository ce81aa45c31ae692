//! nodegate — HTTP gateway bridging requests to cluster workers.
//!
//! ```text
//!   Client ──HTTP──▶ listener ──▶ routing ──▶ bridge ──node protocol──▶ worker
//!   Client ◀─HTTP── response mapping ◀── reply decode ◀── receive loop ◀┘
//! ```
//!
//! Each request runs one bridged call: connect to the routed node, send the
//! `(token, method, uri)` envelope to the registered worker process, absorb
//! liveness pings until the reply delivery arrives, decode it, respond.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use nodegate::config::load_config;
use nodegate::observability::{logging, metrics};
use nodegate::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "nodegate", about = "HTTP to cluster-worker bridge")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "nodegate.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(&args.config)?;
    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        config = %args.config.display(),
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        connect_timeout_secs = config.timeouts.connect_secs,
        reply_timeout_secs = config.timeouts.reply_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
