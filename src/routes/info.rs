//! Service info endpoint: which host answered, and when.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppError;
use crate::host;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub service: String,
    pub hostname: String,
    pub timestamp: String,
    pub note: String,
}

pub async fn index(State(state): State<AppState>) -> Result<Json<InfoResponse>, AppError> {
    let service = &state.config.service;

    Ok(Json(InfoResponse {
        service: service.name.clone(),
        hostname: host::hostname()?,
        timestamp: host::timestamp(),
        note: service.note.clone(),
    }))
}
