//! bentoapp demo server.
//!
//! ```text
//!   browser ──GET /demo──────────────▶ page route ──▶ shell(document)
//!      │                                   │
//!      │                                   └─ TableRegistry::embed (page 1)
//!      │
//!      ├──hx-get /_bento/table/{id}──▶ table partial (sort, page, clamp)
//!      └──hx-post /demo/echo|upload──▶ partial route (bare fragment)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use bentoapp::config::{load_config, AppConfig};
use bentoapp::demo::demo_server;
use bentoapp::lifecycle::{signals, Shutdown};
use bentoapp::observability::{logging, metrics};

#[derive(Debug, Parser)]
#[command(name = "bentoapp", version, about = "Serve the bentoapp demo site")]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overriding `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bentoapp starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        default_page_size = config.tables.default_page_size,
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

    let server = demo_server(config)?;
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    shutdown.trigger_on(signals::termination());

    server.run(listener, rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
