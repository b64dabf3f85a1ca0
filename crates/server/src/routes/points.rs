use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use models::CollectionPoint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AppState;
use crate::errors::ApiError;

const SAVE_FAILED: &str = "Erro ao salvar ponto.";
const LOAD_FAILED: &str = "Erro ao carregar pontos.";

#[derive(Serialize)]
pub struct MaterialsResponse {
    pub materials: &'static [&'static str],
}

#[derive(Serialize)]
pub struct PointsResponse {
    pub points: Vec<CollectionPoint>,
}

#[derive(Serialize)]
pub struct PointResponse {
    pub point: CollectionPoint,
}

/// `?material=` narrows the listing; without it the full collection is returned.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub material: Option<String>,
}

/// 材料目录（仅用于前端筛选下拉框）
pub async fn list_materials(State(state): State<AppState>) -> Json<MaterialsResponse> {
    Json(MaterialsResponse { materials: state.registry.materials_catalog() })
}

pub async fn list_points(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<PointsResponse>, ApiError> {
    let Query(q) = query.map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.body_text()))?;
    let points = state
        .registry
        .list(q.material.as_deref())
        .await
        .map_err(|e| ApiError::from_service(e, LOAD_FAILED))?;
    Ok(Json(PointsResponse { points }))
}

/// Create a point from an untrusted body.
///
/// The body is read raw so that non-JSON or oddly shaped payloads reach the
/// validation pipeline and come back as a field-specific 400.
pub async fn create_point(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<PointResponse>), ApiError> {
    let raw: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let point = state
        .registry
        .create(&raw)
        .await
        .map_err(|e| ApiError::from_service(e, SAVE_FAILED))?;
    Ok((StatusCode::CREATED, Json(PointResponse { point })))
}
