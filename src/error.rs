use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A query parameter could not be interpreted. The message is returned verbatim.
    #[error("{0}")]
    InvalidParameter(String),

    #[error("Host name lookup failed: {0}")]
    Hostname(#[from] std::io::Error),

    #[error("Work task failed: {0}")]
    WorkTask(#[from] tokio::task::JoinError),
}

/// JSON body for every non-2xx response produced by a handler.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidParameter(message) => (StatusCode::BAD_REQUEST, message.clone()),
            _ => {
                tracing::error!("Internal error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
