//! Configuration types for the DDNS updater
//!
//! The configuration is a single JSON object with capitalised keys:
//!
//! ```json
//! {
//!     "Username": "myhost.nsupdate.info",
//!     "Password": "secret",
//!     "Hostname": "myhost.nsupdate.info"
//! }
//! ```
//!
//! An optional `Endpoints` object overrides the service URLs and the
//! resolver used for the published-address lookup.

use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Echo service returning the caller's public IPv4 address
pub const DEFAULT_V4_CHECK_URL: &str = "https://ipv4.nsupdate.info/myip";

/// Echo service returning the caller's public IPv6 address
pub const DEFAULT_V6_CHECK_URL: &str = "https://ipv6.nsupdate.info/myip";

/// Update endpoint reached over IPv4
pub const DEFAULT_V4_UPDATE_URL: &str = "https://ipv4.nsupdate.info/nic/update";

/// Update endpoint reached over IPv6
pub const DEFAULT_V6_UPDATE_URL: &str = "https://ipv6.nsupdate.info/nic/update";

/// Public resolver used for the published-address lookup
pub const DEFAULT_RESOLVER: &str = "8.8.8.8:53";

/// Timeout applied to each published-address lookup
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Main DDNS configuration
#[derive(Clone, Deserialize)]
pub struct DdnsConfig {
    /// Update service account name
    #[serde(rename = "Username")]
    pub username: String,

    /// Update service password
    /// ⚠️ NEVER log this value
    #[serde(rename = "Password")]
    pub password: String,

    /// Hostname whose records are kept current
    #[serde(rename = "Hostname")]
    pub hostname: String,

    /// Service endpoints, defaulting to nsupdate.info and Google DNS
    #[serde(rename = "Endpoints", default)]
    pub endpoints: Endpoints,
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for DdnsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DdnsConfig")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("hostname", &self.hostname)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

impl DdnsConfig {
    /// Create a new configuration with default endpoints
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            hostname: hostname.into(),
            endpoints: Endpoints::default(),
        }
    }

    /// Load and validate a configuration file
    ///
    /// The file handle is released before validation runs, whether or not
    /// parsing succeeded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        let path = path.as_ref();
        let config: Self = {
            let file = File::open(path).map_err(|e| {
                crate::Error::config(format!("Cannot open {}: {}", path.display(), e))
            })?;
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                crate::Error::config(format!("Cannot parse {}: {}", path.display(), e))
            })?
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.username.is_empty() {
            return Err(crate::Error::config("Username cannot be empty"));
        }
        if self.password.is_empty() {
            return Err(crate::Error::config("Password cannot be empty"));
        }
        validate_domain_name(&self.hostname)?;
        self.endpoints.validate()
    }
}

/// Service endpoints
///
/// Every field is optional in the file; missing ones fall back to the
/// `DEFAULT_*` constants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// IPv4 echo service
    pub v4_check: String,

    /// IPv6 echo service
    pub v6_check: String,

    /// IPv4 update endpoint
    pub v4_update: String,

    /// IPv6 update endpoint
    pub v6_update: String,

    /// DNS server queried over UDP for the published addresses
    pub resolver: SocketAddr,

    /// Published-address lookup timeout (in seconds)
    pub lookup_timeout_secs: u64,
}

impl Endpoints {
    /// Lookup timeout as a `Duration`
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    /// Validate the endpoint settings
    pub fn validate(&self) -> Result<(), crate::Error> {
        for (name, url) in [
            ("v4_check", &self.v4_check),
            ("v6_check", &self.v6_check),
            ("v4_update", &self.v4_update),
            ("v6_update", &self.v6_update),
        ] {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(crate::Error::config(format!(
                    "Endpoint {} must use HTTP or HTTPS scheme. Got: {}",
                    name, url
                )));
            }
        }

        if self.lookup_timeout_secs == 0 {
            return Err(crate::Error::config("lookup_timeout_secs must be > 0"));
        }

        Ok(())
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            v4_check: DEFAULT_V4_CHECK_URL.to_string(),
            v6_check: DEFAULT_V6_CHECK_URL.to_string(),
            v4_update: DEFAULT_V4_UPDATE_URL.to_string(),
            v6_update: DEFAULT_V6_UPDATE_URL.to_string(),
            resolver: SocketAddr::from(([8, 8, 8, 8], 53)),
            lookup_timeout_secs: DEFAULT_LOOKUP_TIMEOUT_SECS,
        }
    }
}

/// Validate that a string is a valid domain name
///
/// Basic RFC 1035 checks. Not comprehensive but catches common errors.
pub fn validate_domain_name(domain: &str) -> Result<(), crate::Error> {
    if domain.is_empty() {
        return Err(crate::Error::config("Hostname cannot be empty"));
    }

    // RFC 1035: 253 chars max
    if domain.len() > 253 {
        return Err(crate::Error::config(format!(
            "Hostname too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        )));
    }

    // Fully-qualified form: one trailing root dot is allowed
    let labels = domain.strip_suffix('.').unwrap_or(domain);

    for label in labels.split('.') {
        if label.is_empty() {
            return Err(crate::Error::config(format!(
                "Hostname has empty label: '{}'",
                domain
            )));
        }

        if label.len() > 63 {
            return Err(crate::Error::config(format!(
                "Hostname label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            )));
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(crate::Error::config(format!(
                "Hostname label contains invalid characters. Label: '{}'. \
                Valid: alphanumeric and hyphen only.",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(crate::Error::config(format!(
                "Hostname label cannot start or end with hyphen. Label: '{}'",
                label
            )));
        }
    }

    Ok(())
}
