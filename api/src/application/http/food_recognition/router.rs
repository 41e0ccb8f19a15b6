use super::handlers::{
    analyze_image::{__path_analyze_image, analyze_image},
    analyze_raw::{__path_analyze_raw, analyze_raw},
    get_knowledge_base::{__path_get_knowledge_base, get_knowledge_base},
    home::{__path_home, home},
};
use crate::application::http::server::app_state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use utoipa::OpenApi;

// Leaves room for the multipart framing around a maximum-size image.
const ANALYZE_BODY_LIMIT: usize = 12 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(paths(home, analyze_image, analyze_raw, get_knowledge_base))]
pub struct FoodRecognitionApiDoc;

pub fn food_recognition_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(&format!("{}/", state.args.server.root_path), get(home))
        .route(
            &format!("{}/analyze", state.args.server.root_path),
            post(analyze_image).layer(DefaultBodyLimit::max(ANALYZE_BODY_LIMIT)),
        )
        .route(
            &format!("{}/analyze/raw", state.args.server.root_path),
            post(analyze_raw),
        )
        .route(
            &format!("{}/knowledge-base", state.args.server.root_path),
            get(get_knowledge_base),
        )
}
