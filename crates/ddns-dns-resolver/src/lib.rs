// # DNS Published-Address Source
//
// This crate reads the addresses currently published for the hostname.
//
// ## Architecture
//
// Queries go to one fixed external name server (Google's 8.8.8.8 by
// default) over UDP instead of the system resolver. Local caches, hosts
// files and split-horizon setups would otherwise hide what the rest of the
// internet sees.
//
// A and AAAA records are looked up separately. When several records are
// published, the last one answered is used.

use ddns_core::config::Endpoints;
use ddns_core::traits::{IpVersion, PublishedAddressSource};
use ddns_core::{Error, Result};

use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Published-address source backed by a single UDP name server
pub struct DnsPublishedSource {
    /// Name server queried
    server: SocketAddr,

    /// Resolver bound to `server`
    resolver: TokioAsyncResolver,
}

impl std::fmt::Debug for DnsPublishedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsPublishedSource")
            .field("server", &self.server)
            .finish()
    }
}

impl DnsPublishedSource {
    /// Create a source querying `server` over UDP
    ///
    /// # Parameters
    ///
    /// - `server`: Name server address, e.g. `8.8.8.8:53`
    /// - `timeout`: Upper bound for each lookup
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        let mut config = ResolverConfig::new();
        config.add_name_server(NameServerConfig::new(server, Protocol::Udp));

        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        // One try per lookup keeps the timeout a hard bound
        opts.attempts = 1;
        opts.use_hosts_file = false;

        Self {
            server,
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }

    /// Create from the configured endpoints
    pub fn from_endpoints(endpoints: &Endpoints) -> Self {
        Self::new(endpoints.resolver, endpoints.lookup_timeout())
    }

    /// Name server queried by this source
    pub fn server(&self) -> SocketAddr {
        self.server
    }
}

#[async_trait::async_trait]
impl PublishedAddressSource for DnsPublishedSource {
    async fn lookup(&self, hostname: &str, version: IpVersion) -> Result<Option<IpAddr>> {
        tracing::debug!("Resolving {} {} via {}", version, hostname, self.server);

        let result = match version {
            IpVersion::V4 => self
                .resolver
                .ipv4_lookup(hostname)
                .await
                .map(|lookup| lookup.iter().last().map(|a| IpAddr::V4(a.0))),
            IpVersion::V6 => self
                .resolver
                .ipv6_lookup(hostname)
                .await
                .map(|lookup| lookup.iter().last().map(|aaaa| IpAddr::V6(aaaa.0))),
        };

        match result {
            Ok(ip) => Ok(ip),
            Err(e) => match e.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => Ok(None),
                _ => Err(Error::network(format!(
                    "{} lookup for {} via {} failed: {}",
                    version, hostname, self.server, e
                ))),
            },
        }
    }
}
