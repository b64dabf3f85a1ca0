use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use common::types::Health;
use tracing::error;

pub async fn health() -> Json<Health> {
    Json(Health::now())
}

/// Prometheus text exposition of the default registry.
pub async fn metrics() -> impl IntoResponse {
    match service::metrics::encode_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        ),
        Err(e) => {
            error!(error = %e, "metrics encode failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("metrics encode error: {e}"),
            )
        }
    }
}
