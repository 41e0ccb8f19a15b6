use std::time::Duration;

use tracing::info;

use crate::{
    domain::{
        common::{
            AnalysisConfig, InferenceBackendKind, InferenceConfig, SmartFridgeConfig,
            entities::app_errors::CoreError, services::Service,
        },
        food_recognition::{
            knowledge_base::{FoodVocabulary, KnowledgeBase, KnowledgeFile},
            value_objects::{RecognitionContext, RecommendationPolicy},
        },
    },
    infrastructure::{
        inference::{HttpInferenceClient, InferenceBackend},
        llm::gemini_client::GeminiCaptionClient,
    },
};

pub type SmartFridgeService = Service<InferenceBackend>;

pub fn create_service(config: SmartFridgeConfig) -> Result<SmartFridgeService, CoreError> {
    let inference = create_inference_backend(&config.inference)?;
    let context = create_recognition_context(&config.analysis)?;

    info!(
        backend = inference.kind().as_str(),
        knowledge_entries = context.knowledge_base.len(),
        vocabulary = context.vocabulary.keywords().len(),
        confidence_threshold = context.policy.confidence_threshold,
        "Food recognition service ready"
    );

    Ok(Service::new(inference, context))
}

pub fn create_inference_backend(config: &InferenceConfig) -> Result<InferenceBackend, CoreError> {
    let timeout = Duration::from_secs(config.timeout_seconds);

    match config.backend {
        InferenceBackendKind::Http => {
            let client =
                HttpInferenceClient::new(config.endpoint(), config.api_key.clone(), timeout)?;
            Ok(InferenceBackend::Http(client))
        }
        InferenceBackendKind::Gemini => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                CoreError::Configuration("the gemini backend requires an API key".to_string())
            })?;
            let client = GeminiCaptionClient::new(
                config.endpoint(),
                api_key,
                config.model().to_string(),
                timeout,
            )?;
            Ok(InferenceBackend::Gemini(client))
        }
    }
}

/// Builds the process-wide tables: the built-in ones, or the file named in
/// the configuration.
pub fn create_recognition_context(
    config: &AnalysisConfig,
) -> Result<RecognitionContext, CoreError> {
    let (knowledge_base, vocabulary) = match &config.knowledge_base_path {
        Some(path) => KnowledgeFile::load(path)?.into_tables()?,
        None => (KnowledgeBase::default(), FoodVocabulary::default()),
    };

    let policy = RecommendationPolicy::new(
        config.confidence_threshold,
        config.gate_unknown_confidence,
    );

    Ok(RecognitionContext::new(knowledge_base, vocabulary, policy))
}
