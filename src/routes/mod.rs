//! HTTP route handlers.
//!
//! Three JSON endpoints: service info at `/`, a liveness probe at `/health`,
//! and synthetic CPU load at `/work`. Every response is marked `no-store` since
//! it describes one host at one instant, and every request runs inside a
//! request-id span for log correlation.

pub mod health;
pub mod info;
pub mod work;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(info::index))
        .route("/health", get(health::health))
        .route("/work", get(work::work))
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
