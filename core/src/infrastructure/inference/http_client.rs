use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, header::CONTENT_TYPE};
use serde_json::Value;
use tracing::{error, instrument, warn};

use crate::domain::{
    common::entities::app_errors::CoreError, food_recognition::ports::InferenceClient,
};

/// Posts raw image bytes to an inference endpoint and returns its JSON answer
/// untouched. Works with hosted inference APIs (image classification, object
/// detection, image-to-text) and with self-hosted model servers speaking the
/// same protocol.
#[derive(Debug, Clone)]
pub struct HttpInferenceClient {
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl HttpInferenceClient {
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            CoreError::Configuration(format!("Failed to build inference HTTP client: {}", e))
        })?;

        Ok(Self {
            endpoint,
            api_key,
            client,
        })
    }
}

impl InferenceClient for HttpInferenceClient {
    #[instrument(skip(self, image_data), fields(endpoint = %self.endpoint, size = image_data.len()))]
    async fn infer(&self, image_data: Bytes, mime_type: String) -> Result<Value, CoreError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, mime_type)
            .body(image_data);

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            error!("Inference request failed: {}", e);
            CoreError::InferenceUnavailable(format!("inference request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Inference backend error: {} - {}", status, error_text);
            return Err(CoreError::InferenceUnavailable(format!(
                "inference backend returned {}: {}",
                status, error_text
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            error!("Inference backend returned non-JSON body: {}", e);
            CoreError::InferenceUnavailable(format!("invalid inference response: {}", e))
        })?;

        if let Some(message) = backend_error(&body) {
            warn!("Inference backend reported an error: {}", message);
            return Err(CoreError::InferenceUnavailable(message));
        }

        Ok(body)
    }
}

/// Hosted endpoints answer `{"error": "...", "estimated_time": ...}` while a
/// model is still loading.
fn backend_error(body: &Value) -> Option<String> {
    let error = body.as_object()?.get("error")?;
    Some(match error.as_str() {
        Some(message) => message.to_string(),
        None => error.to_string(),
    })
}
