use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Inference backend unavailable: {0}")]
    InferenceUnavailable(String),

    #[error("Invalid knowledge base: {0}")]
    InvalidKnowledgeBase(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Whether the failure happened while talking to the inference backend,
    /// as opposed to a problem with the caller's input.
    pub fn is_upstream(&self) -> bool {
        matches!(self, CoreError::InferenceUnavailable(_))
    }
}
