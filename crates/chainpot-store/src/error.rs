//! Error types for the persistence gateway.
//!
//! All gateway errors are propagated via [`StoreError`], which wraps the
//! underlying [`fred`] and [`serde_json`] errors. The [`crate::Store`]
//! facade intercepts these at the persistence boundary and degrades to the
//! in-process fallback rather than surfacing them to game logic.

/// Errors that can occur in the persistence gateway.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A Redis operation failed.
    #[error("redis error: {0}")]
    Redis(#[from] fred::error::Error),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration error (bad URL, malformed stored value).
    #[error("configuration error: {0}")]
    Config(String),
}
