// # nsupdate.info Update Client
//
// This crate notifies a dyndns2-compatible service (nsupdate.info by
// default) that the host's address changed.
//
// ## Protocol
//
// - `GET <update endpoint>` with HTTP Basic Authentication
// - No `myip` parameter: the service records the address the request came
//   from, so the IPv4 endpoint updates the A record and the IPv6 endpoint
//   the AAAA record
// - Response body on success starts with a status token:
//   - `good <ip>` → record updated
//   - `nochg <ip>` → record already current
//   - anything else → reported as ambiguous
// - Non-success status (e.g. 401 `badauth`) → `Error::Remote`
//
// ## Security Requirements
//
// - Password NEVER appears in logs or `Debug` output

use async_trait::async_trait;
use ddns_core::traits::{UpdateOutcome, UpdateService};
use ddns_core::{DdnsConfig, HttpFetcher, Result};

/// dyndns2 update client
///
/// Stateless and single-shot: one request per `update()` call, no retries.
pub struct NsUpdateClient {
    /// Account name
    username: String,

    /// Account password
    /// ⚠️ NEVER log this value
    password: String,

    /// HTTP client
    fetcher: HttpFetcher,
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for NsUpdateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NsUpdateClient")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

impl NsUpdateClient {
    /// Create a new update client
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::with_fetcher(username, password, HttpFetcher::new())
    }

    /// Create from the configured credentials
    pub fn from_config(config: &DdnsConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }

    /// Create with a custom fetcher
    pub fn with_fetcher(
        username: impl Into<String>,
        password: impl Into<String>,
        fetcher: HttpFetcher,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            fetcher,
        }
    }
}

#[async_trait]
impl UpdateService for NsUpdateClient {
    async fn update(&self, endpoint: &str) -> Result<UpdateOutcome> {
        tracing::debug!("Calling {} as {}", endpoint, self.username);

        let body = self
            .fetcher
            .get_with_basic_auth(endpoint, &self.username, &self.password)
            .await?;

        Ok(UpdateOutcome::from_body(body))
    }

    fn service_name(&self) -> &'static str {
        "nsupdate"
    }
}
