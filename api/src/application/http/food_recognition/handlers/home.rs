use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::{api_error::ApiError, response::Response};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HomeResponse {
    pub message: String,
    pub usage: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "food-recognition",
    summary = "Welcome",
    responses(
        (status = 200, body = HomeResponse)
    ),
)]
pub async fn home() -> Result<Response<HomeResponse>, ApiError> {
    Ok(Response::OK(HomeResponse {
        message: "Welcome to Smart Fridge AI API 🍎".to_string(),
        usage: "POST an image to /analyze as multipart/form-data with key 'image'".to_string(),
    }))
}
