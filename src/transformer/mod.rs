//! Document transformers.

mod keys;

pub use keys::{transform_with_token, KeyTransformer};

/// Errors raised while transforming a document.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Unknown key transform strategy: {0}")]
    UnknownStrategy(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
