//! HTTP server startup logic.

use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;

use crate::config::AppConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid http.host or http.port: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Parse the configured bind address.
pub fn bind_addr(config: &AppConfig) -> Result<SocketAddr, ServerError> {
    Ok(format!("{}:{}", config.http.host, config.http.port).parse()?)
}

/// Start the HTTP server.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr = bind_addr(config)?;
    let handle = Handle::new();

    tracing::info!(%addr, "Starting HTTP server");

    shutdown::setup_shutdown_handler(handle.clone());

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
