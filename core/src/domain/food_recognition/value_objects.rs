use bytes::Bytes;
use serde_json::Value;

use crate::domain::food_recognition::knowledge_base::{FoodVocabulary, KnowledgeBase};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RecommendationPolicy {
    /// Detections with a known confidence below this value get no advice.
    pub confidence_threshold: f64,
    /// Also hold back detections without a confidence whenever the
    /// threshold is above zero. Off by default: caption backends never
    /// report a score.
    pub gate_unknown_confidence: bool,
}

impl RecommendationPolicy {
    pub fn new(confidence_threshold: f64, gate_unknown_confidence: bool) -> Self {
        Self {
            confidence_threshold,
            gate_unknown_confidence,
        }
    }

    /// Effective threshold: negative or NaN values mean no gating.
    pub fn threshold(&self) -> f64 {
        if self.confidence_threshold.is_nan() || self.confidence_threshold < 0.0 {
            0.0
        } else {
            self.confidence_threshold
        }
    }

    pub fn with_threshold(self, confidence_threshold: Option<f64>) -> Self {
        match confidence_threshold {
            Some(confidence_threshold) => Self {
                confidence_threshold,
                ..self
            },
            None => self,
        }
    }

    /// Whether a detection with this confidence may receive advice.
    pub fn admits(&self, confidence: Option<f64>) -> bool {
        let threshold = self.threshold();
        match confidence {
            Some(confidence) => confidence >= threshold,
            None => !(self.gate_unknown_confidence && threshold > 0.0),
        }
    }
}

/// Read-only tables and policy built once at startup and shared by every request.
#[derive(Debug, Clone, Default)]
pub struct RecognitionContext {
    pub knowledge_base: KnowledgeBase,
    pub vocabulary: FoodVocabulary,
    pub policy: RecommendationPolicy,
}

impl RecognitionContext {
    pub fn new(
        knowledge_base: KnowledgeBase,
        vocabulary: FoodVocabulary,
        policy: RecommendationPolicy,
    ) -> Self {
        Self {
            knowledge_base,
            vocabulary,
            policy,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzeImageInput {
    pub image_data: Bytes,
    pub mime_type: String,
    /// Per-request override of the configured threshold.
    pub confidence_threshold: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct AnalyzeRawInput {
    pub raw: Value,
    pub confidence_threshold: Option<f64>,
}
