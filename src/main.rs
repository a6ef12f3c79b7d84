//! Intake relay binary.
//!
//! A minimal forwarding relay for the POGR intake API:
//!
//! ```text
//!     Client POST             ┌──────────────────────────────┐
//!     ───────────────────────▶│ http (axum router + handlers)│
//!                             │   validate method + headers  │
//!                             │              │               │
//!                             │              ▼               │
//!                             │   relay (UpstreamClient)     │───▶ Upstream
//!     Client Response         │   forward body + headers     │     (intake API)
//!     ◀───────────────────────│   relay status + body back   │◀───
//!                             └──────────────────────────────┘
//! ```
//!
//! Each request is handled independently: validate, forward, relay. No
//! retries, no caching, no state shared between requests.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intake_relay::config;
use intake_relay::http::HttpServer;
use intake_relay::lifecycle::Shutdown;

#[derive(Parser)]
#[command(name = "intake-relay")]
#[command(about = "Forwarding relay for the POGR intake API", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intake_relay=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        upstream = %config.upstream.base_url,
        "Relay listening"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
