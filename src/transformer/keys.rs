//! Recursive key transformer.

use super::TransformError;
use crate::strategy::KeyTransform;
use serde_json::{Map, Value as JsonValue};
use tracing::trace;

/// Rewrites every object key of a document with one strategy.
#[derive(Debug, Clone, Copy)]
pub struct KeyTransformer {
    strategy: KeyTransform,
}

impl KeyTransformer {
    /// Create a transformer for a strategy.
    pub fn new(strategy: KeyTransform) -> Self {
        Self { strategy }
    }

    /// The strategy applied by this transformer.
    pub fn strategy(&self) -> KeyTransform {
        self.strategy
    }

    /// Build a new document with every key rewritten.
    ///
    /// The input is left untouched. Scalars, string values included, are
    /// copied verbatim. When two keys of one object map to the same rewritten
    /// key, the later one wins and keeps the position of the earlier one.
    pub fn transform(&self, json: &JsonValue) -> JsonValue {
        transform_value(json, self.strategy)
    }

    /// Transform a serialized JSON body.
    ///
    /// Returns `None` for a missing or empty body.
    pub fn transform_body(&self, body: Option<&[u8]>) -> Result<Option<Vec<u8>>, TransformError> {
        let body = match body {
            Some(b) if !b.is_empty() => b,
            _ => return Ok(None),
        };

        let json: JsonValue = serde_json::from_slice(body)?;
        let transformed = self.transform(&json);
        Ok(Some(serde_json::to_vec(&transformed)?))
    }
}

/// Transform a document with a raw strategy token.
///
/// The token is parsed here, before the first key is rewritten, so an unknown
/// strategy fails the whole call and no partial document is produced.
pub fn transform_with_token(json: &JsonValue, token: &str) -> Result<JsonValue, TransformError> {
    let strategy: KeyTransform = token.parse()?;
    Ok(KeyTransformer::new(strategy).transform(json))
}

fn transform_value(value: &JsonValue, strategy: KeyTransform) -> JsonValue {
    match value {
        JsonValue::Object(obj) => {
            let mut new_obj = Map::with_capacity(obj.len());
            for (k, v) in obj {
                let key = strategy.apply(k).into_owned();
                if new_obj.contains_key(&key) {
                    trace!(key = %key, original = %k, "Rewritten key collides, keeping later value");
                }
                new_obj.insert(key, transform_value(v, strategy));
            }
            JsonValue::Object(new_obj)
        }
        JsonValue::Array(arr) => {
            JsonValue::Array(arr.iter().map(|v| transform_value(v, strategy)).collect())
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource() -> JsonValue {
        json!({
            "data": {
                "id": "1337",
                "type": "posts",
                "attributes": {
                    "title": "Title 1",
                    "publish_at": "2026-10-20T12:00:00Z"
                },
                "relationships": {
                    "comments": {
                        "data": [
                            { "id": "7", "type": "comments" },
                            { "id": "12", "type": "comments" }
                        ]
                    }
                },
                "meta": { "favorite_count": 10 }
            }
        })
    }

    #[test]
    fn test_nested_keys() {
        let transformer = KeyTransformer::new(KeyTransform::CamelLower);
        assert_eq!(transformer.strategy(), KeyTransform::CamelLower);
        let output = transformer.transform(&resource());

        assert_eq!(output["data"]["attributes"]["publishAt"], "2026-10-20T12:00:00Z");
        assert_eq!(output["data"]["meta"]["favoriteCount"], 10);
        assert!(output["data"]["attributes"].get("publish_at").is_none());
    }

    #[test]
    fn test_objects_inside_arrays() {
        let transformer = KeyTransformer::new(KeyTransform::Camel);
        let output = transformer.transform(&resource());

        let comments = &output["Data"]["Relationships"]["Comments"]["Data"];
        assert_eq!(comments[0], json!({ "Id": "7", "Type": "comments" }));
        assert_eq!(comments[1], json!({ "Id": "12", "Type": "comments" }));
    }

    #[test]
    fn test_key_order_preserved() {
        let input = json!({ "zeta_key": 1, "alpha_key": 2, "mid_key": 3 });
        let output = KeyTransformer::new(KeyTransform::Dashed).transform(&input);

        let keys: Vec<&str> = output
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta-key", "alpha-key", "mid-key"]);
    }

    #[test]
    fn test_colliding_keys_later_wins() {
        let input = json!({ "publish_at": 1, "title": "x", "publishAt": 2 });
        let output = KeyTransformer::new(KeyTransform::CamelLower).transform(&input);

        assert_eq!(output, json!({ "publishAt": 2, "title": "x" }));
        let keys: Vec<&str> = output
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["publishAt", "title"]);
    }

    #[test]
    fn test_string_values_untouched() {
        let input = json!({ "pointer": "/data/attributes/published_at", "tags": ["snake_case"] });
        let output = KeyTransformer::new(KeyTransform::Camel).transform(&input);

        assert_eq!(output["Pointer"], "/data/attributes/published_at");
        assert_eq!(output["Tags"], json!(["snake_case"]));
    }

    #[test]
    fn test_scalars_pass_through() {
        let transformer = KeyTransformer::new(KeyTransform::Camel);
        assert_eq!(transformer.transform(&json!("some_value")), json!("some_value"));
        assert_eq!(transformer.transform(&json!(42)), json!(42));
        assert_eq!(transformer.transform(&json!(true)), json!(true));
        assert_eq!(transformer.transform(&json!(null)), json!(null));
    }

    #[test]
    fn test_empty_collections() {
        let transformer = KeyTransformer::new(KeyTransform::Dashed);
        assert_eq!(transformer.transform(&json!({})), json!({}));
        assert_eq!(transformer.transform(&json!([])), json!([]));
    }

    #[test]
    fn test_input_not_mutated() {
        let input = resource();
        let before = input.clone();
        let _ = KeyTransformer::new(KeyTransform::Camel).transform(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn test_transform_with_token() {
        let output = transform_with_token(&json!({ "publish_at": 1 }), "dashed").unwrap();
        assert_eq!(output, json!({ "publish-at": 1 }));
    }

    #[test]
    fn test_transform_with_unknown_token() {
        let err = transform_with_token(&json!({ "title": "x" }), "zoot").unwrap_err();
        assert!(matches!(err, TransformError::UnknownStrategy(ref t) if t == "zoot"));

        // Scalar documents fail the same way.
        assert!(transform_with_token(&json!(1), "krazy").is_err());
    }

    #[test]
    fn test_transform_body() {
        let transformer = KeyTransformer::new(KeyTransform::Dashed);
        let body = serde_json::to_vec(&json!({ "favorite_count": 10 })).unwrap();

        let output = transformer.transform_body(Some(&body)).unwrap().unwrap();
        let output: JsonValue = serde_json::from_slice(&output).unwrap();
        assert_eq!(output, json!({ "favorite-count": 10 }));
    }

    #[test]
    fn test_transform_body_empty() {
        let transformer = KeyTransformer::new(KeyTransform::Dashed);
        assert!(transformer.transform_body(None).unwrap().is_none());
        assert!(transformer.transform_body(Some(b"".as_slice())).unwrap().is_none());
    }

    #[test]
    fn test_transform_body_invalid_json() {
        let transformer = KeyTransformer::new(KeyTransform::Dashed);
        let err = transformer.transform_body(Some(b"{not json".as_slice())).unwrap_err();
        assert!(matches!(err, TransformError::Json(_)));
    }
}
