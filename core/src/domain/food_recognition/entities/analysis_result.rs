use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::food_recognition::{
    entities::{Detection, Recommendation},
    helpers::overall_suggestion,
};

/// Terminal artifact of one analysis. Built per request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    pub has_food: bool,
    /// Every normalized detection, including the ones the confidence gate held back.
    pub detections: Vec<Detection>,
    pub recommendations: Vec<Recommendation>,
    /// Caption text when the backend answered with a generated description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub suggestion: String,
}

impl AnalysisResult {
    pub fn new(
        has_food: bool,
        detections: Vec<Detection>,
        recommendations: Vec<Recommendation>,
    ) -> Self {
        Self {
            has_food,
            detections,
            recommendations,
            description: None,
            suggestion: overall_suggestion(has_food).to_string(),
        }
    }

    pub fn empty() -> Self {
        Self::new(false, Vec::new(), Vec::new())
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}
