//! Error types for the suggestion adapter

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Service error: {0}")]
    Service(String),
}

pub type SuggestResult<T> = Result<T, SuggestError>;
