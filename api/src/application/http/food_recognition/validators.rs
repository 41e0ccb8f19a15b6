use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyzeRawRequest {
    /// Output of an inference backend, as returned by it.
    #[schema(value_type = Object, example = json!([{"label": "banana", "score": 0.93}]))]
    pub raw: Value,

    #[validate(range(
        min = 0.0,
        max = 1.0,
        message = "confidence_threshold must be between 0 and 1"
    ))]
    #[schema(example = 0.5)]
    pub confidence_threshold: Option<f64>,
}
