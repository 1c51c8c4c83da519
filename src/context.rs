//! Per-render serialization context.

/// Values supplied by the caller for a single render.
#[derive(Debug, Clone, Default)]
pub struct SerializationContext {
    /// Correlation ID, carried into log fields
    pub correlation_id: String,
    /// Per-call key transform token.
    ///
    /// Not validated: any token is accepted here and checked when the
    /// document is transformed.
    pub key_transform: Option<String>,
}

impl SerializationContext {
    /// Create a new serialization context.
    pub fn new(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            key_transform: None,
        }
    }

    /// Set the per-call key transform override.
    pub fn with_key_transform(mut self, token: impl Into<String>) -> Self {
        self.key_transform = Some(token.into());
        self
    }

    /// The per-call override, if any.
    pub fn key_transform(&self) -> Option<&str> {
        self.key_transform.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_has_no_override() {
        let ctx = SerializationContext::new("req-1");
        assert_eq!(ctx.correlation_id, "req-1");
        assert!(ctx.key_transform().is_none());
    }

    #[test]
    fn test_with_key_transform() {
        let ctx = SerializationContext::new("req-2").with_key_transform("krazy");
        assert_eq!(ctx.key_transform(), Some("krazy"));
    }
}
