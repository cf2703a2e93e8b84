//! Review service client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::error::ReviewError;

/// Source of raw review status responses.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetch every status change reported after the `after` unix timestamp.
    async fn fetch(&self, after: i64) -> Result<Value, ReviewError>;
}

/// HTTP client for the Practicum homework status API.
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: SecretString,
}

impl PracticumClient {
    /// Create a client for `endpoint`, authenticating with `token`.
    pub fn new(endpoint: impl Into<String>, token: SecretString) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint: endpoint.into(),
            token,
        }
    }

    fn auth_header(&self) -> String {
        format!("OAuth {}", self.token.expose_secret())
    }
}

#[async_trait]
impl ReviewSource for PracticumClient {
    async fn fetch(&self, after: i64) -> Result<Value, ReviewError> {
        tracing::debug!(from_date = after, "Requesting review statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", self.auth_header())
            .query(&[("from_date", after)])
            .send()
            .await
            .map_err(|e| ReviewError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ReviewError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ReviewError::Transport(e.to_string()))?;

        decode_body(&body)
    }
}

/// Parse a response body into JSON.
pub fn decode_body(body: &str) -> Result<Value, ReviewError> {
    serde_json::from_str(body).map_err(|e| ReviewError::InvalidBody(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header_uses_oauth_scheme() {
        let client = PracticumClient::new(
            crate::config::DEFAULT_ENDPOINT,
            SecretString::from("abc".to_string()),
        );
        assert_eq!(client.auth_header(), "OAuth abc");
    }

    #[test]
    fn test_decode_body() {
        let value = decode_body(r#"{"homeworks": [], "current_date": 1}"#).unwrap();
        assert_eq!(value["current_date"], 1);
    }

    #[test]
    fn test_decode_invalid_body_is_shape_error() {
        let err = decode_body("<html>maintenance</html>").unwrap_err();
        assert!(matches!(err, ReviewError::InvalidBody(_)));
        assert_eq!(err.severity(), crate::error::Severity::DataShape);
    }
}
