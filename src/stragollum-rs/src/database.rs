use crate::collection::Collection;
use crate::commander::DataApiCommander;
use crate::{ClientError, Result};
use reqwest::Client as HttpClient;
use stragollum_core::models::{CollectionsStatus, Command, CommandResponse, OkStatus, API_PATH};
use stragollum_core::CollectionDefinition;

/// Handle to one keyspace of a database.
///
/// Collection-management commands are sent to
/// `<api_endpoint>/api/json/v1/<keyspace>`.
#[derive(Debug, Clone)]
pub struct Database {
    api_endpoint: String,
    keyspace: String,
    token: Option<String>,
    commander: DataApiCommander,
}

impl Database {
    pub(crate) fn new(
        api_endpoint: String,
        keyspace: String,
        token: Option<String>,
        http: HttpClient,
    ) -> Self {
        let url = format!("{}/{}/{}", api_endpoint, API_PATH, keyspace);
        let commander = DataApiCommander::with_http_client(url, token.clone(), http);
        Self {
            api_endpoint,
            keyspace,
            token,
            commander,
        }
    }

    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    pub fn keyspace(&self) -> &str {
        &self.keyspace
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn commander(&self) -> &DataApiCommander {
        &self.commander
    }

    /// List the names of all collections in the keyspace.
    ///
    /// A response without `status.collections` yields an empty list.
    #[tracing::instrument(skip(self), fields(keyspace = %self.keyspace))]
    pub async fn list_collection_names(&self) -> Result<Vec<String>> {
        let response: CommandResponse<CollectionsStatus> =
            self.commander.request(&Command::find_collections()).await?;

        Ok(response
            .status
            .map(|status| status.collections)
            .unwrap_or_default())
    }

    /// Create a collection and return a handle to it.
    ///
    /// The definition is validated before anything is sent.
    #[tracing::instrument(skip(self, definition), fields(keyspace = %self.keyspace))]
    pub async fn create_collection(
        &self,
        name: &str,
        definition: &CollectionDefinition,
    ) -> Result<Collection> {
        definition.validate()?;

        let response: CommandResponse<OkStatus> = self
            .commander
            .request(&Command::create_collection(name, definition))
            .await?;
        expect_ok(response, "createCollection")?;

        tracing::info!(collection = %name, "Collection created");
        Ok(self.get_collection(name, None))
    }

    #[tracing::instrument(skip(self), fields(keyspace = %self.keyspace))]
    pub async fn drop_collection(&self, name: &str) -> Result<()> {
        let response: CommandResponse<OkStatus> = self
            .commander
            .request(&Command::delete_collection(name))
            .await?;
        expect_ok(response, "deleteCollection")?;

        tracing::info!(collection = %name, "Collection dropped");
        Ok(())
    }

    /// Get a handle to a collection without contacting the server.
    ///
    /// `token` overrides the database token for this handle only.
    pub fn get_collection(&self, name: &str, token: Option<&str>) -> Collection {
        let token = token.map(str::to_string).or_else(|| self.token.clone());
        let url = format!("{}/{}", self.commander.url(), name);
        let commander =
            DataApiCommander::with_http_client(url, token.clone(), self.commander.http_client().clone());

        Collection::new(
            name.to_string(),
            self.keyspace.clone(),
            self.api_endpoint.clone(),
            token,
            commander,
        )
    }
}

fn expect_ok(response: CommandResponse<OkStatus>, command: &str) -> Result<()> {
    match response.status {
        Some(status) if status.is_ok() => Ok(()),
        Some(status) => Err(ClientError::UnexpectedResponse(format!(
            "{} returned status.ok = {:?}",
            command, status.ok
        ))),
        None => Err(ClientError::UnexpectedResponse(format!(
            "{} response has no status",
            command
        ))),
    }
}
