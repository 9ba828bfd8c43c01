use crate::error::StoreError;

/// Common Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
