use crate::application::http::{
    food_recognition::router::FoodRecognitionApiDoc, health::HealthApiDoc,
    server::api_entities::api_error::ApiErrorResponse,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SmartFridge API",
        description = "Recognizes food in fridge photos and turns it into study-friendly advice."
    ),
    nest(
        (path = "/health", api = HealthApiDoc),
    ),
    components(schemas(ApiErrorResponse)),
    tags(
        (name = "food-recognition", description = "Image analysis and advice"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;

/// Full document: routes mounted at the root are merged, the rest nested.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi().merge_from(FoodRecognitionApiDoc::openapi())
}
