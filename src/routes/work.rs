//! Synthetic load endpoint.
//!
//! `GET /work?ms=N` burns CPU for N milliseconds (clamped, default 200) and
//! reports how many loop iterations it managed.

use std::time::{Duration, Instant};

use axum::{extract::Query, Extension, Json};
use serde::Serialize;
use tracing::instrument;

use crate::config::DEFAULT_WORK_MS;
use crate::error::AppError;
use crate::host;
use crate::middleware::RequestId;
use crate::work::{busy_wait, parse_ms};

/// Query name carrying the requested duration
const MS_PARAM: &str = "ms";

/// First value of `ms` in the query string. Later repeats are ignored.
fn first_ms(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == MS_PARAM)
        .map(|(_, value)| value.as_str())
}

#[derive(Debug, Serialize)]
pub struct WorkResponse {
    pub work_ms: u64,
    pub iterations: u64,
    pub hostname: String,
    pub timestamp: String,
}

#[instrument(name = "work", skip_all)]
pub async fn work(
    Extension(RequestId(request_id)): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<WorkResponse>, AppError> {
    let raw = first_ms(&pairs).unwrap_or(DEFAULT_WORK_MS);
    let work_ms = parse_ms(raw).inspect_err(|_| {
        tracing::debug!(ms = raw, "Rejected non-integer ms parameter");
    })?;

    // The spin runs on the blocking pool: it holds that thread for the full
    // duration while the async workers keep serving other requests.
    let start = Instant::now();
    let iterations =
        tokio::task::spawn_blocking(move || busy_wait(Duration::from_millis(work_ms))).await?;

    tracing::debug!(
        %request_id,
        work_ms,
        iterations,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Busy-wait finished"
    );

    Ok(Json(WorkResponse {
        work_ms,
        iterations,
        hostname: host::hostname()?,
        timestamp: host::timestamp(),
    }))
}
