use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use crate::domain::{
    common::entities::app_errors::CoreError, food_recognition::ports::InferenceClient,
};

const CAPTION_PROMPT: &str = "Describe in one detailed sentence what is in this picture. \
Name every food, drink and container you can see.";
const MAX_OUTPUT_TOKENS: u32 = 256;

/// Uses Gemini vision as a captioning backend. The generated description is
/// handed back in caption shape, `{"generated_text": "..."}`.
#[derive(Debug, Clone)]
pub struct GeminiCaptionClient {
    base_url: String,
    api_key: String,
    model_name: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: String,
}

impl GeminiCaptionClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model_name: String,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            CoreError::Configuration(format!("Failed to build Gemini HTTP client: {}", e))
        })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model_name,
            client,
        })
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model_name, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // the URL carries the API key
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::InferenceUnavailable(format!("Gemini API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::InferenceUnavailable(format!(
                "Gemini API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::InferenceUnavailable(format!("Failed to parse Gemini response: {}", e))
        })?;

        gemini_response
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| CoreError::InferenceUnavailable("No response from Gemini".to_string()))
    }
}

impl InferenceClient for GeminiCaptionClient {
    #[instrument(skip(self, image_data), fields(model = %self.model_name, size = image_data.len()))]
    async fn infer(&self, image_data: Bytes, mime_type: String) -> Result<Value, CoreError> {
        let base64_image = general_purpose::STANDARD.encode(&image_data);

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: CAPTION_PROMPT.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type,
                            data: base64_image,
                        },
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
                temperature: 0.0,
            }),
        };

        let caption = self.call_gemini_api(request).await?;

        Ok(json!({ "generated_text": caption.trim() }))
    }
}
