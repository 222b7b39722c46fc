//! Error types for explanation search

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("Strategy '{strategy}' failed: {message}")]
    StrategyFailed { strategy: String, message: String },

    #[error("Unsupported target: {0}")]
    UnsupportedTarget(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ExplainResult<T> = Result<T, ExplainError>;

impl ExplainError {
    pub fn strategy_failed(strategy: &str, message: impl Into<String>) -> Self {
        ExplainError::StrategyFailed { strategy: strategy.to_string(), message: message.into() }
    }
}
