//! Error handling for the resume copilot core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeCopilotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Embedding provider error: {0}")]
    Embedding(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid signal payload: {0}")]
    InvalidSignal(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ResumeCopilotError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeCopilotError {
    fn from(err: anyhow::Error) -> Self {
        ResumeCopilotError::InvalidInput(err.to_string())
    }
}
