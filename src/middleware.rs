//! Request ID middleware for correlating logs with requests.
//!
//! Generates a UUID v4 for each incoming request and wraps the request in a
//! tracing span, so every log emitted while serving it (including the work
//! handler's timing) carries the same `request_id`.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

/// Request ID stored in request extensions.
#[derive(Clone, Debug)]
pub struct RequestId(pub Uuid);

/// Middleware that generates a request ID and creates a request span.
///
/// Must be the outermost layer so the span covers every other layer.
pub async fn request_id_layer(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();
    request.extensions_mut().insert(RequestId(request_id));

    async move {
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        response
    }
    .instrument(span)
    .await
}
