use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Dietary advice attached to a knowledge-base keyword found in a detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recommendation {
    /// Display-cased keyword, e.g. "Ice Cream".
    pub food: String,
    pub keyword: String,
    pub advice: String,
    /// Confidence of the detection the keyword was matched in.
    pub confidence: Option<f64>,
}
