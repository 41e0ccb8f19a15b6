use axum::extract::State;
use serde::{Deserialize, Serialize};
use smartfridge_core::domain::food_recognition::{
    knowledge_base::KnowledgeEntry, ports::FoodRecognitionService,
};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct KnowledgeBaseView {
    pub entries: Vec<KnowledgeEntry>,
    pub vocabulary: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetKnowledgeBaseResponse {
    pub data: KnowledgeBaseView,
}

#[utoipa::path(
    get,
    path = "/knowledge-base",
    tag = "food-recognition",
    summary = "List the advice table",
    description = "Returns the keyword to advice entries and the vocabulary used to decide whether an image shows food.",
    responses(
        (status = 200, body = GetKnowledgeBaseResponse)
    ),
)]
pub async fn get_knowledge_base(
    State(state): State<AppState>,
) -> Result<Response<GetKnowledgeBaseResponse>, ApiError> {
    let entries = state.service.knowledge_base().entries().to_vec();
    let vocabulary = state.service.vocabulary().keywords().to_vec();

    Ok(Response::OK(GetKnowledgeBaseResponse {
        data: KnowledgeBaseView {
            entries,
            vocabulary,
        },
    }))
}
