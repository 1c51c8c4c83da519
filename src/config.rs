//! Configuration types for the key transform renderer.

use crate::strategy::KeyTransform;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyTransformConfig {
    /// Configuration version
    pub version: String,
    /// Global settings
    pub settings: Settings,
}

impl Default for KeyTransformConfig {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            settings: Settings::default(),
        }
    }
}

/// Global settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Adapter the documents are rendered for; selects the fallback strategy
    pub adapter: AdapterKind,
    /// Global default key transform.
    ///
    /// Kept as the raw token: it is only validated when a document is
    /// transformed, or by an explicit validation pass.
    pub key_transform: Option<String>,
    /// Pretty print rendered output
    pub pretty: bool,
}

/// Output adapter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum AdapterKind {
    /// Bare attribute hashes
    Attributes,
    /// Plain JSON with a root key
    Json,
    /// JSON:API documents
    #[default]
    JsonApi,
}

impl AdapterKind {
    /// Strategy used when neither a per-call override nor a global default is set.
    pub fn default_key_transform(&self) -> KeyTransform {
        match self {
            AdapterKind::JsonApi => KeyTransform::Dashed,
            AdapterKind::Attributes | AdapterKind::Json => KeyTransform::Unaltered,
        }
    }
}
