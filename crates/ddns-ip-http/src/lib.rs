// # HTTP IP Source
//
// This crate provides the actual-address lookup for the DDNS updater.
//
// ## Architecture
//
// Fetches the host's public address from "what is my IP" echo services,
// one URL per IP version. Each service answers with the caller's address
// as plain text, so the request must leave the host over the matching
// IP version (the v6 service is only reachable over IPv6).
//
// Unlike the published-address lookup, any failure here aborts the run.

use ddns_core::config::Endpoints;
use ddns_core::traits::{IpVersion, PublicIpSource};
use ddns_core::{HttpFetcher, Result};

/// HTTP echo-service IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// IPv4 echo service URL
    v4_url: String,

    /// IPv6 echo service URL
    v6_url: String,

    /// HTTP client
    fetcher: HttpFetcher,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `v4_url`: URL echoing the caller's IPv4 address
    /// - `v6_url`: URL echoing the caller's IPv6 address
    pub fn new(v4_url: impl Into<String>, v6_url: impl Into<String>) -> Self {
        Self::with_fetcher(v4_url, v6_url, HttpFetcher::new())
    }

    /// Create from the configured endpoints
    pub fn from_endpoints(endpoints: &Endpoints) -> Self {
        Self::new(endpoints.v4_check.clone(), endpoints.v6_check.clone())
    }

    /// Create with a custom fetcher
    pub fn with_fetcher(
        v4_url: impl Into<String>,
        v6_url: impl Into<String>,
        fetcher: HttpFetcher,
    ) -> Self {
        Self {
            v4_url: v4_url.into(),
            v6_url: v6_url.into(),
            fetcher,
        }
    }

    fn url(&self, version: IpVersion) -> &str {
        match version {
            IpVersion::V4 => &self.v4_url,
            IpVersion::V6 => &self.v6_url,
        }
    }
}

#[async_trait::async_trait]
impl PublicIpSource for HttpIpSource {
    async fn current(&self, version: IpVersion) -> Result<String> {
        let url = self.url(version);
        tracing::debug!("Fetching public {} from {}", version, url);

        let body = self.fetcher.get(url).await?;
        let ip = body.trim().to_string();

        tracing::info!("Public {}: {}", version, ip);
        Ok(ip)
    }
}
