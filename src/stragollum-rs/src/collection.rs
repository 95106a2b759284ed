use crate::commander::DataApiCommander;
use crate::{ClientError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use stragollum_core::models::{Command, CommandResponse, DocumentData, InsertedIdsStatus};

/// Handle to a single collection.
///
/// Document commands are sent to
/// `<api_endpoint>/api/json/v1/<keyspace>/<name>`.
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    keyspace: String,
    api_endpoint: String,
    token: Option<String>,
    commander: DataApiCommander,
}

impl Collection {
    pub(crate) fn new(
        name: String,
        keyspace: String,
        api_endpoint: String,
        token: Option<String>,
        commander: DataApiCommander,
    ) -> Self {
        Self {
            name,
            keyspace,
            api_endpoint,
            token,
            commander,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keyspace(&self) -> &str {
        &self.keyspace
    }

    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn commander(&self) -> &DataApiCommander {
        &self.commander
    }

    /// Insert a document and return its id
    #[tracing::instrument(skip(self, document), fields(collection = %self.name))]
    pub async fn insert_one<D: Serialize>(&self, document: &D) -> Result<String> {
        let response: CommandResponse<InsertedIdsStatus> = self
            .commander
            .request(&Command::InsertOne { document })
            .await?;

        response
            .status
            .and_then(|status| status.inserted_ids.into_iter().next())
            .ok_or_else(|| ClientError::EmptyResult("insertOne returned no inserted ids".to_string()))
    }

    /// Find the first document matching `filter`.
    ///
    /// Returns `None` when nothing matched.
    #[tracing::instrument(skip(self, filter), fields(collection = %self.name))]
    pub async fn find_one<F, T>(&self, filter: &F) -> Result<Option<T>>
    where
        F: Serialize,
        T: DeserializeOwned,
    {
        let response: CommandResponse<Value, DocumentData> = self
            .commander
            .request(&Command::FindOne { filter })
            .await?;

        match response.data.and_then(|data| data.document) {
            Some(document) => serde_json::from_value(document)
                .map(Some)
                .map_err(ClientError::Deserialization),
            None => Ok(None),
        }
    }
}
