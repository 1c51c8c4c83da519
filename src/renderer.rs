//! Document renderer.

use crate::config::KeyTransformConfig;
use crate::context::SerializationContext;
use crate::resolver::resolve;
use crate::strategy::KeyTransform;
use crate::transformer::{transform_with_token, TransformError};
use serde_json::Value as JsonValue;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, trace, warn};

/// Applies the configured key transform to assembled documents.
///
/// The renderer owns the global default. Callers that need a different
/// strategy for a single render pass it through the
/// [`SerializationContext`]; a temporary change of the global default goes
/// through [`DocumentRenderer::scoped_key_transform`].
#[derive(Debug)]
pub struct DocumentRenderer {
    /// Configuration
    config: KeyTransformConfig,
    /// Metrics: total render calls.
    renders_total: AtomicU64,
    /// Metrics: total failed renders.
    render_errors: AtomicU64,
}

/// Snapshot of the renderer counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub renders_total: u64,
    pub render_errors: u64,
}

impl DocumentRenderer {
    /// Create a new renderer from configuration.
    pub fn new(config: KeyTransformConfig) -> Self {
        info!(
            adapter = ?config.settings.adapter,
            key_transform = ?config.settings.key_transform,
            "Document renderer initialized"
        );

        Self {
            config,
            renders_total: AtomicU64::new(0),
            render_errors: AtomicU64::new(0),
        }
    }

    /// Create from a YAML configuration string.
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        let config: KeyTransformConfig = serde_yaml::from_str(yaml)?;
        Ok(Self::new(config))
    }

    /// Create from a JSON configuration string.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        let config: KeyTransformConfig = serde_json::from_str(json)?;
        Ok(Self::new(config))
    }

    /// Current configuration.
    pub fn config(&self) -> &KeyTransformConfig {
        &self.config
    }

    /// Check that the configured global default names a known strategy.
    ///
    /// Rendering does not call this; an unknown token only fails once a
    /// document is transformed with it.
    pub fn validate(&self) -> Result<(), RenderError> {
        if let Some(token) = &self.config.settings.key_transform {
            token
                .parse::<KeyTransform>()
                .map_err(|e| RenderError::InvalidConfig(format!("settings.key_transform: {e}")))?;
        }
        Ok(())
    }

    /// Rewrite the keys of `document` with the strategy selected for `ctx`.
    ///
    /// Fails with [`TransformError::UnknownStrategy`] when the selected token
    /// is not a known strategy. No partial document is returned.
    pub fn render(
        &self,
        document: &JsonValue,
        ctx: &SerializationContext,
    ) -> Result<JsonValue, RenderError> {
        self.renders_total.fetch_add(1, Ordering::Relaxed);

        let settings = &self.config.settings;
        let resolved = resolve(
            ctx.key_transform(),
            settings.key_transform.as_deref(),
            settings.adapter,
        );

        debug!(
            correlation_id = %ctx.correlation_id,
            key_transform = resolved.token,
            source = %resolved.source,
            "Resolved key transform"
        );

        match transform_with_token(document, resolved.token) {
            Ok(rendered) => {
                trace!(correlation_id = %ctx.correlation_id, "Rendered document");
                Ok(rendered)
            }
            Err(e) => {
                warn!(
                    correlation_id = %ctx.correlation_id,
                    key_transform = resolved.token,
                    error = %e,
                    "Document render failed"
                );
                self.render_errors.fetch_add(1, Ordering::Relaxed);
                Err(e.into())
            }
        }
    }

    /// Render and serialize, honoring the `pretty` setting.
    pub fn render_to_string(
        &self,
        document: &JsonValue,
        ctx: &SerializationContext,
    ) -> Result<String, RenderError> {
        let rendered = self.render(document, ctx)?;
        let output = if self.config.settings.pretty {
            serde_json::to_string_pretty(&rendered)?
        } else {
            serde_json::to_string(&rendered)?
        };
        Ok(output)
    }

    /// Replace the global default until the returned guard is dropped.
    ///
    /// `None` clears the global default for the scope, so renders fall back to
    /// the adapter default.
    pub fn scoped_key_transform(&mut self, token: Option<&str>) -> ScopedKeyTransform<'_> {
        let previous = std::mem::replace(
            &mut self.config.settings.key_transform,
            token.map(str::to_string),
        );

        debug!(
            key_transform = ?token,
            previous = ?previous,
            "Entering scoped key transform"
        );

        ScopedKeyTransform {
            renderer: self,
            previous,
        }
    }

    /// Run `f` with the global default set to `token`.
    ///
    /// The previous default is restored when `f` returns or unwinds.
    pub fn with_key_transform<T>(
        &mut self,
        token: &str,
        f: impl FnOnce(&DocumentRenderer) -> T,
    ) -> T {
        let scoped = self.scoped_key_transform(Some(token));
        f(&*scoped)
    }

    /// Current counter values.
    pub fn stats(&self) -> RenderStats {
        RenderStats {
            renders_total: self.renders_total.load(Ordering::Relaxed),
            render_errors: self.render_errors.load(Ordering::Relaxed),
        }
    }
}

/// Guard returned by [`DocumentRenderer::scoped_key_transform`].
///
/// Dereferences to the renderer; restores the previous global default on drop.
#[derive(Debug)]
pub struct ScopedKeyTransform<'a> {
    renderer: &'a mut DocumentRenderer,
    previous: Option<String>,
}

impl Deref for ScopedKeyTransform<'_> {
    type Target = DocumentRenderer;

    fn deref(&self) -> &DocumentRenderer {
        &*self.renderer
    }
}

impl Drop for ScopedKeyTransform<'_> {
    fn drop(&mut self) {
        self.renderer.config.settings.key_transform = self.previous.take();
        debug!(
            key_transform = ?self.renderer.config.settings.key_transform,
            "Restored key transform"
        );
    }
}

/// Renderer errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
