//! HTTP fetch helper
//!
//! Plain GET requests returning the response body as text. Shared by the
//! echo-service IP source and the update client.
//!
//! - Transport failure → [`Error::Network`]
//! - Non-success status → [`Error::Remote`] carrying the body
//! - No retries, no timeout beyond the client defaults

use crate::error::{Error, Result};
use reqwest::RequestBuilder;

/// Thin wrapper around a `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default client
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder().build().unwrap_or_default(),
        }
    }

    /// Create a fetcher around an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET `url` and return the body
    pub async fn get(&self, url: &str) -> Result<String> {
        self.send(self.client.get(url)).await
    }

    /// GET `url` with HTTP Basic Authentication and return the body
    pub async fn get_with_basic_auth(
        &self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<String> {
        self.send(self.client.get(url).basic_auth(username, Some(password)))
            .await
    }

    async fn send(&self, request: RequestBuilder) -> Result<String> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::network(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("HTTP {} with body {:?}", status, body);
            return Err(Error::remote(status.as_u16(), body));
        }

        response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response: {}", e)))
    }
}
