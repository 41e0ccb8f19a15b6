use tracing::{error, info, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food_recognition::{
        engine::analyze,
        entities::AnalysisResult,
        knowledge_base::{FoodVocabulary, KnowledgeBase},
        ports::{FoodRecognitionService, InferenceClient},
        value_objects::{AnalyzeImageInput, AnalyzeRawInput},
    },
};

impl<I> FoodRecognitionService for Service<I>
where
    I: InferenceClient,
{
    #[instrument(skip(self, input), fields(size = input.image_data.len(), mime_type = %input.mime_type))]
    async fn analyze_image(&self, input: AnalyzeImageInput) -> Result<AnalysisResult, CoreError> {
        if input.image_data.is_empty() {
            return Err(CoreError::Invalid("image cannot be empty".to_string()));
        }

        if let Some(threshold) = input.confidence_threshold
            && !(0.0..=1.0).contains(&threshold)
        {
            return Err(CoreError::Invalid(format!(
                "confidence_threshold must be between 0 and 1, got {}",
                threshold
            )));
        }

        let raw = self
            .inference_client
            .infer(input.image_data, input.mime_type)
            .await
            .map_err(|e| {
                error!("Inference backend call failed: {}", e);
                if e.is_upstream() {
                    e
                } else {
                    CoreError::InferenceUnavailable(e.to_string())
                }
            })?;

        let policy = self.context.policy.with_threshold(input.confidence_threshold);
        let result = analyze(&raw, &self.context, policy);

        info!(
            has_food = result.has_food,
            detections = result.detections.len(),
            recommendations = result.recommendations.len(),
            "Analyzed image"
        );

        Ok(result)
    }

    fn analyze_raw(&self, input: AnalyzeRawInput) -> AnalysisResult {
        let policy = self.context.policy.with_threshold(input.confidence_threshold);
        analyze(&input.raw, &self.context, policy)
    }

    fn knowledge_base(&self) -> &KnowledgeBase {
        &self.context.knowledge_base
    }

    fn vocabulary(&self) -> &FoodVocabulary {
        &self.context.vocabulary
    }
}
