//! Collection definitions sent as the `options` of a `createCollection` command.
//!
//! A [`CollectionDefinition`] is built by chaining `with_*` setters. Every field
//! is optional and absent fields are left out of the serialized JSON entirely.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Errors raised by local validation, before anything is sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("vector dimension must be positive, got {0}")]
    NonPositiveDimension(i64),

    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),
}

/// Configuration for creating a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_id: Option<DefaultIdOptions>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub indexing: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexical: Option<LexicalOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rerank: Option<RerankOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<VectorOptions>,
}

/// Type of the `_id` generated for documents inserted without one
/// (e.g. `"uuid"`, `"objectId"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultIdOptions {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub id_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexicalOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RerankOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorOptions {
    /// Must be positive; checked by [`CollectionDefinition::validate`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<i64>,
    /// Similarity metric: "cosine", "dot_product" or "euclidean"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_model: Option<String>,
}

/// Server-side model integration used for vectorize and rerank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOptions {
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub authentication: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

pub type RerankServiceOptions = ServiceOptions;
pub type VectorServiceOptions = ServiceOptions;

impl ServiceOptions {
    pub fn new(provider: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            provider: Some(provider.into()),
            model_name: Some(model_name.into()),
            ..Default::default()
        }
    }

    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_authentication(mut self, authentication: Map<String, Value>) -> Self {
        self.authentication = authentication;
        self
    }
}

impl CollectionDefinition {
    /// Create an empty definition (serializes to `{}`)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_id(mut self, id_type: impl Into<String>) -> Self {
        self.default_id = Some(DefaultIdOptions {
            id_type: Some(id_type.into()),
        });
        self
    }

    pub fn with_indexing(mut self, indexing: Map<String, Value>) -> Self {
        self.indexing = indexing;
        self
    }

    /// Enable lexical search with the given analyzer
    pub fn with_lexical(self, analyzer: impl Into<String>) -> Self {
        self.with_lexical_enabled(analyzer, true)
    }

    pub fn with_lexical_enabled(mut self, analyzer: impl Into<String>, enabled: bool) -> Self {
        self.lexical = Some(LexicalOptions {
            analyzer: Some(analyzer.into()),
            enabled: Some(enabled),
        });
        self
    }

    /// Enable reranking, optionally backed by a specific service
    pub fn with_rerank(self, service: Option<ServiceOptions>) -> Self {
        self.with_rerank_enabled(service, true)
    }

    pub fn with_rerank_enabled(mut self, service: Option<ServiceOptions>, enabled: bool) -> Self {
        self.rerank = Some(RerankOptions {
            enabled: Some(enabled),
            service,
        });
        self
    }

    /// Replace the whole vector configuration
    pub fn with_vector(mut self, vector: VectorOptions) -> Self {
        self.vector = Some(vector);
        self
    }

    pub fn with_vector_dimension(mut self, dimension: i64) -> Self {
        self.vector_mut().dimension = Some(dimension);
        self
    }

    pub fn with_vector_metric(mut self, metric: impl Into<String>) -> Self {
        self.vector_mut().metric = Some(metric.into());
        self
    }

    pub fn with_vector_source_model(mut self, source_model: impl Into<String>) -> Self {
        self.vector_mut().source_model = Some(source_model.into());
        self
    }

    pub fn with_vector_service(mut self, service: ServiceOptions) -> Self {
        self.vector_mut().service = Some(service);
        self
    }

    fn vector_mut(&mut self) -> &mut VectorOptions {
        self.vector.get_or_insert_with(VectorOptions::default)
    }

    /// Check the definition for values the server would reject.
    ///
    /// Only the vector dimension is checked. Setters and serialization never
    /// call this.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.vector.as_ref().and_then(|v| v.dimension) {
            Some(dimension) if dimension <= 0 => {
                Err(ValidationError::NonPositiveDimension(dimension))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kv() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("k".to_string(), json!("v"));
        map
    }

    #[test]
    fn test_empty_definition_serializes_to_empty_object() {
        let value = serde_json::to_value(CollectionDefinition::new()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_default_id_and_lexical_only() {
        let def = CollectionDefinition::new()
            .with_default_id("string")
            .with_lexical("standard");

        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(
            value,
            json!({
                "defaultId": {"type": "string"},
                "lexical": {"analyzer": "standard", "enabled": true}
            })
        );
    }

    #[test]
    fn test_full_definition() {
        let mut indexing = Map::new();
        indexing.insert("foo".to_string(), json!("bar"));

        let def = CollectionDefinition::new()
            .with_default_id("string")
            .with_indexing(indexing)
            .with_lexical("standard")
            .with_rerank(Some(
                ServiceOptions::new("rerank-provider", "rerank-model")
                    .with_authentication(kv())
                    .with_parameters(kv()),
            ))
            .with_vector(VectorOptions {
                dimension: Some(999),
                metric: Some("cosine".to_string()),
                service: Some(
                    ServiceOptions::new("vector-provider", "vector-model")
                        .with_authentication(kv())
                        .with_parameters(kv()),
                ),
                source_model: Some("source-model".to_string()),
            });

        let expected = json!({
            "defaultId": {"type": "string"},
            "indexing": {"foo": "bar"},
            "lexical": {"analyzer": "standard", "enabled": true},
            "rerank": {
                "enabled": true,
                "service": {
                    "authentication": {"k": "v"},
                    "modelName": "rerank-model",
                    "parameters": {"k": "v"},
                    "provider": "rerank-provider"
                }
            },
            "vector": {
                "dimension": 999,
                "metric": "cosine",
                "service": {
                    "authentication": {"k": "v"},
                    "modelName": "vector-model",
                    "parameters": {"k": "v"},
                    "provider": "vector-provider"
                },
                "sourceModel": "source-model"
            }
        });

        assert_eq!(serde_json::to_value(&def).unwrap(), expected);
    }

    #[test]
    fn test_explicit_disable() {
        let def = CollectionDefinition::new()
            .with_lexical_enabled("standard", false)
            .with_rerank_enabled(None, false);

        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(
            value,
            json!({
                "lexical": {"analyzer": "standard", "enabled": false},
                "rerank": {"enabled": false}
            })
        );
    }

    #[test]
    fn test_later_setters_override_earlier_ones() {
        let def = CollectionDefinition::new()
            .with_lexical("standard")
            .with_lexical_enabled("whitespace", false)
            .with_vector_dimension(3)
            .with_vector_dimension(5);

        let lexical = def.lexical.as_ref().unwrap();
        assert_eq!(lexical.analyzer.as_deref(), Some("whitespace"));
        assert_eq!(lexical.enabled, Some(false));
        assert_eq!(def.vector.as_ref().unwrap().dimension, Some(5));
    }

    #[test]
    fn test_vector_setters_initialize_lazily() {
        let def = CollectionDefinition::new()
            .with_vector_metric("dot_product")
            .with_vector_source_model("openai-v3-small")
            .with_vector_service(ServiceOptions::new("openai", "text-embedding-3-small"));

        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(
            value,
            json!({
                "vector": {
                    "metric": "dot_product",
                    "service": {"modelName": "text-embedding-3-small", "provider": "openai"},
                    "sourceModel": "openai-v3-small"
                }
            })
        );
    }

    #[test]
    fn test_validate() {
        assert!(CollectionDefinition::new().validate().is_ok());
        assert!(CollectionDefinition::new()
            .with_vector_metric("cosine")
            .validate()
            .is_ok());
        assert!(CollectionDefinition::new()
            .with_vector_dimension(1536)
            .validate()
            .is_ok());

        assert_eq!(
            CollectionDefinition::new().with_vector_dimension(0).validate(),
            Err(ValidationError::NonPositiveDimension(0))
        );
        assert_eq!(
            CollectionDefinition::new().with_vector_dimension(-4).validate(),
            Err(ValidationError::NonPositiveDimension(-4))
        );
    }

    #[test]
    fn test_setters_do_not_validate() {
        // An invalid dimension still serializes; only validate() rejects it
        let def = CollectionDefinition::new().with_vector_dimension(-1);
        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value, json!({"vector": {"dimension": -1}}));
    }

    #[test]
    fn test_deserialize_round_trip() {
        let def = CollectionDefinition::new()
            .with_default_id("uuid")
            .with_vector_dimension(128)
            .with_vector_metric("euclidean");
        let json = serde_json::to_string(&def).unwrap();
        let parsed: CollectionDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, def);
    }
}
