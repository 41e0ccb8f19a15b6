use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use smartfridge_core::domain::common::{
    AnalysisConfig, InferenceBackendKind, InferenceConfig, SmartFridgeConfig,
};
use url::Url;

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub inference: InferenceArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServerArgs {
    #[arg(
        long = "server-allowed-origins",
        env = "ALLOWED_ORIGINS",
        num_args = 0..,
        value_delimiter = ','
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 7860)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "metrics-enabled",
        env = "METRICS_ENABLED",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub metrics_enabled: bool,

    #[arg(long = "tls-cert", env = "TLS_CERT", requires = "tls_key")]
    pub tls_cert: Option<PathBuf>,

    #[arg(long = "tls-key", env = "TLS_KEY", requires = "tls_cert")]
    pub tls_key: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    Http,
    Gemini,
}

impl From<Backend> for InferenceBackendKind {
    fn from(value: Backend) -> Self {
        match value {
            Backend::Http => InferenceBackendKind::Http,
            Backend::Gemini => InferenceBackendKind::Gemini,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct InferenceArgs {
    #[arg(
        long = "inference-backend",
        env = "INFERENCE_BACKEND",
        value_enum,
        default_value = "http"
    )]
    pub backend: Backend,

    /// Model URL for the http backend, API base URL for gemini.
    #[arg(long = "inference-endpoint", env = "INFERENCE_ENDPOINT")]
    pub endpoint: Option<Url>,

    #[arg(long = "inference-api-key", env = "INFERENCE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long = "inference-model", env = "INFERENCE_MODEL")]
    pub model: Option<String>,

    #[arg(
        long = "inference-timeout-seconds",
        env = "INFERENCE_TIMEOUT_SECONDS",
        default_value_t = 30
    )]
    pub timeout_seconds: u64,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AnalysisArgs {
    #[arg(
        long = "confidence-threshold",
        env = "CONFIDENCE_THRESHOLD",
        default_value_t = 0.0,
        value_parser = parse_threshold
    )]
    pub confidence_threshold: f64,

    /// Also drop detections without a confidence when a threshold is set.
    #[arg(long = "gate-unknown-confidence", env = "GATE_UNKNOWN_CONFIDENCE")]
    pub gate_unknown_confidence: bool,

    /// JSON file replacing the built-in advice table and food vocabulary.
    #[arg(long = "knowledge-base-path", env = "KNOWLEDGE_BASE_PATH")]
    pub knowledge_base_path: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LogArgs {
    #[arg(
        long = "log-filter",
        env = "LOG_FILTER",
        default_value = "info"
    )]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

fn parse_threshold(value: &str) -> Result<f64, String> {
    let threshold: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;

    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(format!("threshold must be between 0 and 1, got {threshold}"))
    }
}

impl From<Args> for SmartFridgeConfig {
    fn from(args: Args) -> Self {
        SmartFridgeConfig {
            inference: InferenceConfig {
                backend: args.inference.backend.into(),
                endpoint: args.inference.endpoint.map(String::from),
                api_key: args.inference.api_key,
                model: args.inference.model,
                timeout_seconds: args.inference.timeout_seconds,
            },
            analysis: AnalysisConfig {
                confidence_threshold: args.analysis.confidence_threshold,
                gate_unknown_confidence: args.analysis.gate_unknown_confidence,
                knowledge_base_path: args.analysis.knowledge_base_path,
            },
        }
    }
}
