//! Key casing for JSON:API documents.
//!
//! Rewrites every object key of an assembled document with one casing
//! strategy, leaving values untouched:
//!
//! - `unaltered`: keys are emitted as given
//! - `dashed`: `publish_at` becomes `publish-at`
//! - `camel`: `publish_at` becomes `PublishAt`
//! - `camel_lower`: `publish_at` becomes `publishAt`
//!
//! The strategy for a render is the per-call override from the
//! [`SerializationContext`] if present, else the configured global default,
//! else the adapter fallback (`dashed` for JSON:API).
//!
//! ## Configuration Example
//!
//! ```yaml
//! version: "1"
//! settings:
//!   adapter: json_api
//!   key_transform: camel_lower
//! ```

pub mod config;
pub mod context;
pub mod renderer;
pub mod resolver;
pub mod strategy;
pub mod transformer;

pub use config::{AdapterKind, KeyTransformConfig};
pub use context::SerializationContext;
pub use renderer::{DocumentRenderer, RenderError, RenderStats, ScopedKeyTransform};
pub use resolver::{resolve, ResolvedTransform, TransformSource};
pub use strategy::KeyTransform;
pub use transformer::{KeyTransformer, TransformError};
