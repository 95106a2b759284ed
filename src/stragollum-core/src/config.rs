use serde::{Deserialize, Serialize};

use crate::environment::Environment;

/// Client configuration, usually loaded from a JSON file.
///
/// ```json
/// {"environment": "prod", "token": "AstraCS:...", "timeout_secs": 30}
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub environment: Environment,

    /// Default token inherited by every database handle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Whole-request timeout applied to the HTTP client. No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub insecure_skip_verify: bool,
}

impl ClientConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}
