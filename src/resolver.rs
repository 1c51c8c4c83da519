//! Key transform resolution.
//!
//! Precedence, highest first:
//!
//! 1. the per-call override from the [`SerializationContext`](crate::SerializationContext)
//! 2. the configured global default
//! 3. the adapter fallback ([`AdapterKind::default_key_transform`])
//!
//! Resolution never validates the selected token.

use crate::config::AdapterKind;
use crate::strategy::KeyTransform;
use crate::transformer::TransformError;
use std::fmt;

/// Configuration layer a key transform was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformSource {
    PerCall,
    Global,
    Fallback,
}

impl fmt::Display for TransformSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransformSource::PerCall => "per_call",
            TransformSource::Global => "global",
            TransformSource::Fallback => "fallback",
        })
    }
}

/// The key transform selected for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTransform<'a> {
    /// Raw strategy token
    pub token: &'a str,
    /// Layer the token came from
    pub source: TransformSource,
}

impl ResolvedTransform<'_> {
    /// Parse the token into a strategy.
    pub fn strategy(&self) -> Result<KeyTransform, TransformError> {
        self.token.parse()
    }
}

/// Select the key transform for a render.
pub fn resolve<'a>(
    per_call: Option<&'a str>,
    global: Option<&'a str>,
    adapter: AdapterKind,
) -> ResolvedTransform<'a> {
    match (per_call, global) {
        (Some(token), _) => ResolvedTransform {
            token,
            source: TransformSource::PerCall,
        },
        (None, Some(token)) => ResolvedTransform {
            token,
            source: TransformSource::Global,
        },
        (None, None) => ResolvedTransform {
            token: adapter.default_key_transform().as_str(),
            source: TransformSource::Fallback,
        },
    }
}
