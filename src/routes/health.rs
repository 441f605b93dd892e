//! Health check endpoint for load balancer target groups.
//!
//! Cheap and side-effect free so it can be polled at high frequency.

use axum::Json;
use serde::Serialize;

use crate::config::HEALTH_STATUS_OK;
use crate::host;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Health check handler.
///
/// Only proves the process can answer HTTP; it never touches the host name lookup.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS_OK,
        timestamp: host::timestamp(),
    })
}
