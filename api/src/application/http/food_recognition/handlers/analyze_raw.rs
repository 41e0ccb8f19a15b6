use axum::extract::State;
use smartfridge_core::domain::{
    common::generate_uuid_v7,
    food_recognition::{ports::FoodRecognitionService, value_objects::AnalyzeRawInput},
};
use tracing::info;

use crate::application::http::{
    food_recognition::{
        handlers::analyze_image::AnalysisResponse, validators::AnalyzeRawRequest,
    },
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/analyze/raw",
    tag = "food-recognition",
    summary = "Analyze backend output",
    description = "Runs the recognition pipeline on output already produced by a label-list, object-detection or captioning model.",
    request_body = AnalyzeRawRequest,
    responses(
        (status = 200, body = AnalysisResponse),
        (status = 400, description = "Malformed JSON body", body = ApiErrorResponse),
        (status = 422, description = "Threshold out of range", body = ApiErrorResponse)
    ),
)]
pub async fn analyze_raw(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeRawRequest>,
) -> Result<Response<AnalysisResponse>, ApiError> {
    let request_id = generate_uuid_v7();

    let result = state.service.analyze_raw(AnalyzeRawInput {
        raw: payload.raw,
        confidence_threshold: payload.confidence_threshold,
    });

    info!(
        %request_id,
        has_food = result.has_food,
        detections = result.detections.len(),
        "Raw output analyzed"
    );

    Ok(Response::OK(AnalysisResponse {
        request_id,
        data: result,
    }))
}
