use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paymail_server::{serve, AppState, Config};

/// Paymail (bsvalias) capability discovery and resolution server.
#[derive(Debug, Parser)]
#[command(name = "paymail-server", version)]
struct Cli {
    /// Base URL prefixed to every capability template
    #[arg(long, default_value = "localhost", env = "PAYMAIL_BASE_URL")]
    base_url: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080, env = "PAYMAIL_PORT")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "PAYMAIL_BIND")]
    bind: IpAddr,

    /// JSON file listing the served accounts
    #[arg(long, env = "PAYMAIL_DIRECTORY")]
    directory: Option<PathBuf>,

    /// Deadline for a single resolver lookup, in milliseconds
    #[arg(long, default_value_t = 2000, env = "PAYMAIL_RESOLVE_TIMEOUT_MS")]
    resolve_timeout_ms: u64,

    /// Do not log individual requests
    #[arg(long, env = "PAYMAIL_QUIET")]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            base_url: self.base_url,
            bind: self.bind,
            port: self.port,
            directory: self.directory,
            resolve_timeout: Duration::from_millis(self.resolve_timeout_ms),
            log_requests: !self.quiet,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paymail_server=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenv::dotenv().ok();
    let config = Cli::parse().into_config();

    info!(
        base_url = %config.base_url,
        port = config.port,
        directory = ?config.directory,
        "Starting paymail server"
    );

    let state = match AppState::from_config(config).await {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to load directory: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(state).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}
