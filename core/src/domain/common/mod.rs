use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct SmartFridgeConfig {
    pub inference: InferenceConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InferenceBackendKind {
    /// Any endpoint that accepts raw image bytes and answers with JSON
    /// (hosted inference APIs, self-hosted model servers).
    Http,
    /// Gemini `generateContent`, used as a captioning backend.
    Gemini,
}

impl InferenceBackendKind {
    pub fn as_str(&self) -> &str {
        match self {
            InferenceBackendKind::Http => "http",
            InferenceBackendKind::Gemini => "gemini",
        }
    }
}

const HOSTED_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";
const DEFAULT_HTTP_MODEL: &str = "nateraw/food";
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Clone, Debug)]
pub struct InferenceConfig {
    pub backend: InferenceBackendKind,
    /// Full model URL for the HTTP backend, API base URL for Gemini.
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: u64,
}

impl InferenceConfig {
    pub fn model(&self) -> &str {
        match (&self.model, self.backend) {
            (Some(model), _) => model,
            (None, InferenceBackendKind::Http) => DEFAULT_HTTP_MODEL,
            (None, InferenceBackendKind::Gemini) => DEFAULT_GEMINI_MODEL,
        }
    }

    /// Explicit endpoint, or the hosted default for the backend.
    pub fn endpoint(&self) -> String {
        match (&self.endpoint, self.backend) {
            (Some(endpoint), _) => endpoint.clone(),
            (None, InferenceBackendKind::Http) => {
                format!("{}/{}", HOSTED_INFERENCE_URL, self.model())
            }
            (None, InferenceBackendKind::Gemini) => GEMINI_API_URL.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AnalysisConfig {
    pub confidence_threshold: f64,
    pub gate_unknown_confidence: bool,
    pub knowledge_base_path: Option<PathBuf>,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

/// Time-ordered identifier attached to every analysis for log correlation.
pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
