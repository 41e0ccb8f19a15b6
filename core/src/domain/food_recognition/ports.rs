use std::future::Future;

use bytes::Bytes;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_recognition::{
        entities::AnalysisResult,
        knowledge_base::{FoodVocabulary, KnowledgeBase},
        value_objects::{AnalyzeImageInput, AnalyzeRawInput},
    },
};

/// Inference backend that turns image bytes into raw, backend-shaped JSON.
#[cfg_attr(test, mockall::automock)]
pub trait InferenceClient: Send + Sync {
    fn infer(
        &self,
        image_data: Bytes,
        mime_type: String,
    ) -> impl Future<Output = Result<serde_json::Value, CoreError>> + Send;
}

/// Service trait for food recognition
pub trait FoodRecognitionService: Send + Sync {
    /// Sends the image to the inference backend and analyzes its answer.
    /// Backend failures surface as [`CoreError::InferenceUnavailable`].
    fn analyze_image(
        &self,
        input: AnalyzeImageInput,
    ) -> impl Future<Output = Result<AnalysisResult, CoreError>> + Send;

    /// Analyzes backend output the caller already has.
    fn analyze_raw(&self, input: AnalyzeRawInput) -> AnalysisResult;

    fn knowledge_base(&self) -> &KnowledgeBase;

    fn vocabulary(&self) -> &FoodVocabulary;
}
