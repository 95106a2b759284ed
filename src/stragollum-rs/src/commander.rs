use crate::{ClientError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

/// Header carrying the application token
pub const TOKEN_HEADER: &str = "Token";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Performs one POST round trip against a fixed Data API URL.
///
/// Holds nothing but the target URL, the token and a handle to the shared
/// HTTP connection pool.
#[derive(Debug, Clone)]
pub struct DataApiCommander {
    url: String,
    token: Option<String>,
    http: HttpClient,
}

impl DataApiCommander {
    /// Create a commander with its own HTTP client
    pub fn new(url: impl Into<String>, token: Option<String>) -> Self {
        Self::with_http_client(url, token, HttpClient::new())
    }

    pub fn with_http_client(url: impl Into<String>, token: Option<String>, http: HttpClient) -> Self {
        Self {
            url: url.into(),
            token,
            http,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn http_client(&self) -> &HttpClient {
        &self.http
    }

    /// POST `payload` to the bound URL and return the raw response body.
    ///
    /// Caller headers are applied first; the token header is set last and
    /// replaces any caller value of the same name.
    pub async fn raw_request(
        &self,
        payload: Vec<u8>,
        headers: &HashMap<String, String>,
    ) -> Result<Vec<u8>> {
        let mut header_map = HeaderMap::with_capacity(headers.len() + 1);
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ClientError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| ClientError::InvalidHeader(name.clone()))?;
            header_map.insert(header_name, header_value);
        }

        if let Some(token) = &self.token {
            let invalid = || ClientError::InvalidHeader(TOKEN_HEADER.to_string());
            let name = HeaderName::from_bytes(TOKEN_HEADER.as_bytes()).map_err(|_| invalid())?;
            let mut value = HeaderValue::from_str(token).map_err(|_| invalid())?;
            value.set_sensitive(true);
            header_map.insert(name, value);
        }

        tracing::debug!(url = %self.url, bytes = payload.len(), "Sending Data API request");

        let response = self
            .http
            .post(&self.url)
            .headers(header_map)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Data API responded");

        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }

    /// Send `request` as JSON and decode the JSON response into `Resp`
    pub async fn request<Req, Resp>(&self, request: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let payload = serde_json::to_vec(request).map_err(ClientError::Serialization)?;

        let headers = HashMap::from([
            (CONTENT_TYPE.as_str().to_string(), JSON_CONTENT_TYPE.to_string()),
            (ACCEPT.as_str().to_string(), JSON_CONTENT_TYPE.to_string()),
        ]);

        let body = self.raw_request(payload, &headers).await?;
        serde_json::from_slice(&body).map_err(ClientError::Deserialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token() {
        let url = "https://api.example.com/api/json/v1/ks1";
        let commander = DataApiCommander::new(url, Some("abc123".to_string()));
        assert_eq!(commander.url(), url);
        assert_eq!(commander.token(), Some("abc123"));
    }

    #[test]
    fn test_without_token() {
        let url = "https://api.example.com/api/json/v1/ks2";
        let commander = DataApiCommander::new(url, None);
        assert_eq!(commander.url(), url);
        assert_eq!(commander.token(), None);
    }
}
