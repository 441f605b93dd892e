//! Graceful shutdown on SIGTERM/SIGINT.

use std::time::Duration;

use axum_server::Handle;

use crate::config::SHUTDOWN_GRACE_SECS;

/// Setup graceful shutdown on SIGTERM and SIGINT.
///
/// When either signal is received the server stops accepting connections and
/// waits up to `SHUTDOWN_GRACE_SECS` for in-flight requests, including any
/// `/work` spin, to finish.
pub fn setup_shutdown_handler(handle: Handle) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                tracing::info!("Received Ctrl+C, initiating graceful shutdown");
            }
            _ = terminate => {
                tracing::info!("Received SIGTERM, initiating graceful shutdown");
            }
        }

        handle.graceful_shutdown(Some(Duration::from_secs(SHUTDOWN_GRACE_SECS)));
        tracing::info!(
            grace_secs = SHUTDOWN_GRACE_SECS,
            "Graceful shutdown initiated, waiting for connections to close"
        );
    });
}
