//! aws-signal-app entry point.
//!
//! Parses the command line, loads configuration (file, then environment, then
//! flags), initializes tracing, builds the router and serves until SIGTERM/SIGINT.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use aws_signal_app::config::{AppConfig, LogFormat, DEFAULT_LOG_FILTER};
use aws_signal_app::http::start_server;
use aws_signal_app::{create_router, AppState};

/// aws-signal-app: host info, health check and synthetic CPU load over HTTP
#[derive(Parser, Debug)]
#[command(name = "aws-signal-app", version, about)]
struct Args {
    /// Optional path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening port (overrides the PORT environment variable)
    #[arg(short, long)]
    port: Option<u16>,

    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// Log level filter (e.g., "aws_signal_app=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.http.port = port;
    }
    if let Some(host) = args.host {
        config.http.host = host;
    }

    // Log filter priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let fmt_layer = match config.logging.format {
        LogFormat::Text => tracing_subscriber::fmt::layer().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(fmt_layer)
        .init();

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        service = %config.service.name,
        log_format = ?config.logging.format,
        "Loaded configuration"
    );

    let app = create_router(AppState::new(config.clone()));

    start_server(app, &config).await?;

    Ok(())
}
