pub mod http_client;

use bytes::Bytes;
use serde_json::Value;

use crate::{
    domain::{
        common::{InferenceBackendKind, entities::app_errors::CoreError},
        food_recognition::ports::InferenceClient,
    },
    infrastructure::llm::gemini_client::GeminiCaptionClient,
};

pub use http_client::HttpInferenceClient;

/// The inference backend selected by configuration.
#[derive(Debug, Clone)]
pub enum InferenceBackend {
    Http(HttpInferenceClient),
    Gemini(GeminiCaptionClient),
}

impl InferenceBackend {
    pub fn kind(&self) -> InferenceBackendKind {
        match self {
            InferenceBackend::Http(_) => InferenceBackendKind::Http,
            InferenceBackend::Gemini(_) => InferenceBackendKind::Gemini,
        }
    }
}

impl InferenceClient for InferenceBackend {
    async fn infer(&self, image_data: Bytes, mime_type: String) -> Result<Value, CoreError> {
        match self {
            InferenceBackend::Http(client) => client.infer(image_data, mime_type).await,
            InferenceBackend::Gemini(client) => client.infer(image_data, mime_type).await,
        }
    }
}
