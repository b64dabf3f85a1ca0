use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error response: `{ "error": message }` with the given status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Map a service failure. Validation messages go to the client as-is;
    /// storage failures only expose `internal_msg`.
    pub fn from_service(err: ServiceError, internal_msg: &str) -> Self {
        match err {
            ServiceError::Validation(v) => Self::new(StatusCode::BAD_REQUEST, v.message),
            ServiceError::StoreUnavailable(e) => {
                error!(error = %e, "store unavailable");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, internal_msg)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot open points store: {0}")]
    Store(#[from] service::StoreError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
