use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::definition::CollectionDefinition;

/// Path segment between an API endpoint and the keyspace name
pub const API_PATH: &str = "api/json/v1";

/// Keyspace used when a database handle is requested without one
pub const DEFAULT_KEYSPACE: &str = "default_keyspace";

/// Data API command envelope.
///
/// Serializes with exactly one top-level key named after the command, e.g.
/// `{"insertOne": {"document": {...}}}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Command<'a, D = Value> {
    FindCollections {},
    CreateCollection {
        name: &'a str,
        options: &'a CollectionDefinition,
    },
    DeleteCollection {
        name: &'a str,
    },
    InsertOne {
        document: &'a D,
    },
    FindOne {
        filter: &'a D,
    },
}

impl<'a> Command<'a> {
    pub fn find_collections() -> Self {
        Command::FindCollections {}
    }

    pub fn create_collection(name: &'a str, options: &'a CollectionDefinition) -> Self {
        Command::CreateCollection { name, options }
    }

    pub fn delete_collection(name: &'a str) -> Self {
        Command::DeleteCollection { name }
    }
}

/// Top-level response shape shared by every command.
///
/// Both sections default to `None` so a response missing them still decodes.
#[derive(Debug, Deserialize)]
pub struct CommandResponse<S, T = Value> {
    #[serde(default)]
    pub status: Option<S>,
    #[serde(default)]
    pub data: Option<T>,
}

/// `status` of `findCollections`
#[derive(Debug, Default, Deserialize)]
pub struct CollectionsStatus {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub collections: Vec<String>,
}

/// `status` of DDL commands (`createCollection`, `deleteCollection`)
#[derive(Debug, Default, Deserialize)]
pub struct OkStatus {
    #[serde(default)]
    pub ok: Option<f64>,
}

impl OkStatus {
    pub fn is_ok(&self) -> bool {
        self.ok == Some(1.0)
    }
}

/// `status` of `insertOne`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertedIdsStatus {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub inserted_ids: Vec<String>,
}

/// Decode a list that may be absent or `null` as empty
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// `data` of `findOne`
#[derive(Debug, Default, Deserialize)]
pub struct DocumentData {
    #[serde(default)]
    pub document: Option<Value>,
}
