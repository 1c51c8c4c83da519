//! Key casing strategies.
//!
//! The set of strategies is closed. Tokens coming from configuration or from a
//! serialization context are parsed with [`KeyTransform::from_str`], which is
//! the only place an unknown strategy is reported.

use crate::transformer::TransformError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// `HTTPServer` -> `HTTP_Server`
static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\p{Lu}\d]+)(\p{Lu}\p{Ll})").unwrap());

/// `publishAt` -> `publish_At`
static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\p{Ll}\d])(\p{Lu})").unwrap());

/// Casing strategy applied to every object key of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyTransform {
    /// Keys are emitted as given.
    Unaltered,
    /// `publish_at` -> `publish-at`
    Dashed,
    /// `publish_at` -> `PublishAt`
    Camel,
    /// `publish_at` -> `publishAt`
    CamelLower,
}

impl KeyTransform {
    /// Every supported strategy, in declaration order.
    pub const ALL: [KeyTransform; 4] = [
        KeyTransform::Unaltered,
        KeyTransform::Dashed,
        KeyTransform::Camel,
        KeyTransform::CamelLower,
    ];

    /// The configuration token for this strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyTransform::Unaltered => "unaltered",
            KeyTransform::Dashed => "dashed",
            KeyTransform::Camel => "camel",
            KeyTransform::CamelLower => "camel_lower",
        }
    }

    /// Rewrite a single key.
    ///
    /// Keys are normalized to snake case before being re-cased, so applying a
    /// strategy to its own output returns the same key.
    pub fn apply<'a>(&self, key: &'a str) -> Cow<'a, str> {
        match self {
            KeyTransform::Unaltered => Cow::Borrowed(key),
            KeyTransform::Dashed => {
                let snake = underscore(key);
                if snake.contains('_') {
                    Cow::Owned(snake.replace('_', "-"))
                } else {
                    snake
                }
            }
            KeyTransform::Camel => Cow::Owned(camelize(&underscore(key), true)),
            KeyTransform::CamelLower => Cow::Owned(camelize(&underscore(key), false)),
        }
    }
}

impl fmt::Display for KeyTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyTransform {
    type Err = TransformError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "unaltered" => Ok(KeyTransform::Unaltered),
            "dashed" => Ok(KeyTransform::Dashed),
            "camel" => Ok(KeyTransform::Camel),
            "camel_lower" => Ok(KeyTransform::CamelLower),
            other => Err(TransformError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Normalize a key to snake case.
///
/// Splits camel humps with an underscore, turns hyphens into underscores and
/// lower-cases the result. Snake case input is returned borrowed.
fn underscore(key: &str) -> Cow<'_, str> {
    if !key.chars().any(|c| c.is_uppercase() || c == '-') {
        return Cow::Borrowed(key);
    }

    let word = ACRONYM_BOUNDARY.replace_all(key, "${1}_${2}");
    let word = CAMEL_BOUNDARY.replace_all(&word, "${1}_${2}");
    Cow::Owned(word.replace('-', "_").to_lowercase())
}

/// Join underscore separated segments, capitalizing each one.
///
/// When `upper_first` is false the first non-empty segment keeps a
/// lower-case lead, so `_id` becomes `id`.
fn camelize(snake: &str, upper_first: bool) -> String {
    let mut out = String::with_capacity(snake.len());

    for segment in snake.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            if !upper_first && out.is_empty() {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }

    out
}
