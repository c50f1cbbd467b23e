//! Error types for map and security decoding.

use thiserror::Error;

/// Result type for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors that can occur while decoding an imported file.
///
/// A decode failure is fatal to the single import operation; callers keep
/// their previously loaded model untouched.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input was not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required top-level field was absent
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}
