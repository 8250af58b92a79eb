//! Error type for the edges of the crate
//!
//! The analysis functions themselves are total; errors only arise when
//! validating input or score cards, loading configuration, or installing
//! the logger.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt text is empty")]
    EmptyPrompt,
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    #[error("inconsistent score card: {0}")]
    InvalidScores(String),
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}
