use thiserror::Error;

/// Errors raised by key-value store backends
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Storage quota exceeded")]
    QuotaExceeded,

    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<String> for StoreError {
    fn from(s: String) -> Self {
        StoreError::Backend(s)
    }
}

impl From<&str> for StoreError {
    fn from(s: &str) -> Self {
        StoreError::Backend(s.to_string())
    }
}
