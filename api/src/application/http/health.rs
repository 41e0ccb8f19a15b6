use axum::{Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use smartfridge_core::domain::food_recognition::ports::FoodRecognitionService;
use utoipa::{OpenApi, ToSchema};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LivenessResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ReadinessResponse {
    pub status: String,
    pub backend: String,
    pub knowledge_entries: usize,
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, body = LivenessResponse)
    ),
)]
pub async fn health_live() -> Result<Response<LivenessResponse>, ApiError> {
    Ok(Response::OK(LivenessResponse {
        status: "ok".to_string(),
    }))
}

/// Ready once the service is built: the backend client exists and the
/// advice tables are loaded. The backend itself is not called.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness probe",
    responses(
        (status = 200, body = ReadinessResponse)
    ),
)]
pub async fn health_ready(
    State(state): State<AppState>,
) -> Result<Response<ReadinessResponse>, ApiError> {
    Ok(Response::OK(ReadinessResponse {
        status: "ok".to_string(),
        backend: state.service.inference_client().kind().as_str().to_string(),
        knowledge_entries: state.service.knowledge_base().len(),
    }))
}

#[derive(OpenApi)]
#[openapi(paths(health_live, health_ready))]
pub struct HealthApiDoc;

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{}/health/live", root_path), get(health_live))
        .route(&format!("{}/health/ready", root_path), get(health_ready))
}
