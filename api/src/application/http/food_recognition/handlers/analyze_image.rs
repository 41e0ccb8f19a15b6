use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};
use smartfridge_core::domain::{
    common::generate_uuid_v7,
    food_recognition::{
        entities::AnalysisResult, ports::FoodRecognitionService, value_objects::AnalyzeImageInput,
    },
};
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AnalysisResponse {
    pub request_id: Uuid,
    pub data: AnalysisResult,
}

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "food-recognition",
    summary = "Analyze a fridge photo",
    description = "Sends the uploaded image to the configured inference backend and turns its output into detections and study-friendly advice.",
    request_body(content_type = "multipart/form-data", description = "`image` file and optional `confidence_threshold` field"),
    responses(
        (status = 200, body = AnalysisResponse),
        (status = 400, description = "Missing, empty or oversized image, or bad threshold", body = ApiErrorResponse),
        (status = 502, description = "Inference backend failed", body = ApiErrorResponse)
    ),
)]
pub async fn analyze_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalysisResponse>, ApiError> {
    let mut image: Option<(bytes::Bytes, String)> = None;
    let mut confidence_threshold: Option<f64> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                if data.is_empty() {
                    warn!("Empty image upload attempted");
                    return Err(ApiError::BadRequest("Image cannot be empty".to_string()));
                }

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(ApiError::BadRequest(format!(
                        "Image too large. Max size is {} bytes",
                        MAX_IMAGE_SIZE
                    )));
                }

                image = Some((data, mime_type));
            }
            "confidence_threshold" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read confidence_threshold: {}", e))
                })?;
                let threshold = value.trim().parse::<f64>().map_err(|_| {
                    ApiError::BadRequest("confidence_threshold must be a number".to_string())
                })?;
                confidence_threshold = Some(threshold);
            }
            _ => {}
        }
    }

    let (image_data, mime_type) =
        image.ok_or_else(|| ApiError::BadRequest("No image uploaded".to_string()))?;

    let request_id = generate_uuid_v7();

    let result = state
        .service
        .analyze_image(AnalyzeImageInput {
            image_data,
            mime_type,
            confidence_threshold,
        })
        .await
        .map_err(|e| {
            error!(%request_id, error = %e, "Image analysis failed");
            ApiError::from(e)
        })?;

    info!(
        %request_id,
        has_food = result.has_food,
        recommendations = result.recommendations.len(),
        "Image analyzed"
    );

    Ok(Response::OK(AnalysisResponse {
        request_id,
        data: result,
    }))
}
