use crate::database::Database;
use crate::Result;
use reqwest::Client as HttpClient;
use std::time::Duration;
use stragollum_core::{ClientConfig, Environment, DEFAULT_KEYSPACE};

/// Data API entry point.
///
/// Holds the environment and the default token, and hands out [`Database`]
/// handles. All handles created from one client share its HTTP connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    environment: Environment,
    token: Option<String>,
    http: HttpClient,
}

impl Client {
    /// Create a client. The environment defaults to [`Environment::Prod`].
    pub fn new(environment: Option<Environment>, token: Option<String>) -> Self {
        Self {
            environment: environment.unwrap_or_default(),
            token,
            http: HttpClient::new(),
        }
    }

    /// Create a client from configuration, applying its HTTP settings
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if config.insecure_skip_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            environment: config.environment,
            token: config.token.clone(),
            http: builder.build()?,
        })
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, TLS roots)
    pub fn with_http_client(mut self, http: HttpClient) -> Self {
        self.http = http;
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Get a handle to one keyspace of the database at `api_endpoint`.
    ///
    /// `token` overrides the client token; an absent or empty `keyspace` falls
    /// back to [`DEFAULT_KEYSPACE`]. No request is made.
    pub fn get_database(
        &self,
        api_endpoint: impl Into<String>,
        token: Option<&str>,
        keyspace: Option<&str>,
    ) -> Database {
        let token = token.map(str::to_string).or_else(|| self.token.clone());
        let keyspace = keyspace
            .filter(|ks| !ks.is_empty())
            .unwrap_or(DEFAULT_KEYSPACE);

        Database::new(api_endpoint.into(), keyspace.to_string(), token, self.http.clone())
    }
}
