//! Core DDNS engine
//!
//! The DdnsEngine runs one update pass:
//! - Reading the published addresses via PublishedAddressSource
//! - Reading the actual public addresses via PublicIpSource
//! - Comparing them per IP version
//! - Notifying the UpdateService for every version that differs
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────┐   ┌────────────────┐
//! │ PublishedAddressSource │   │ PublicIpSource │
//! └────────────────────────┘   └────────────────┘
//!             │ PublishedAddresses    │ ActualAddresses
//!             └──────────┬────────────┘
//!                        ▼
//!                 ┌──────────────┐
//!                 │ AddressReport│── changed? ──┐
//!                 └──────────────┘              ▼
//!                                      ┌───────────────┐
//!                                      │ UpdateService │
//!                                      └───────────────┘
//! ```
//!
//! ## Failure Model
//!
//! 1. Published lookup failures become empty addresses (forces an update)
//! 2. Actual lookup failures abort the run before any update
//! 3. The first update failure aborts the remaining updates
//!
//! Updates already issued are not rolled back.

use crate::config::{DdnsConfig, Endpoints};
use crate::error::Result;
use crate::traits::{IpVersion, PublicIpSource, PublishedAddressSource, UpdateOutcome, UpdateService};
use tracing::{debug, info, warn};

/// Addresses currently published in DNS, empty when none was found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishedAddresses {
    pub v4: String,
    pub v6: String,
}

/// Addresses reported by the echo services
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActualAddresses {
    pub v4: String,
    pub v6: String,
}

/// Published and actual address for one IP version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressState {
    /// Address found in DNS (possibly empty)
    pub published: String,
    /// Address observed by the echo service (possibly empty)
    pub actual: String,
    /// `published != actual`
    pub changed: bool,
}

impl AddressState {
    /// Build the state, deriving `changed` from plain string inequality
    pub fn new(published: impl Into<String>, actual: impl Into<String>) -> Self {
        let published = published.into();
        let actual = actual.into();
        let changed = published != actual;
        Self {
            published,
            actual,
            changed,
        }
    }
}

/// Both address states, composed before the update decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressReport {
    pub v4: AddressState,
    pub v6: AddressState,
}

impl AddressReport {
    /// Pair published and actual addresses per version
    pub fn compose(published: PublishedAddresses, actual: ActualAddresses) -> Self {
        Self {
            v4: AddressState::new(published.v4, actual.v4),
            v6: AddressState::new(published.v6, actual.v6),
        }
    }

    /// State for one IP version
    pub fn get(&self, version: IpVersion) -> &AddressState {
        match version {
            IpVersion::V4 => &self.v4,
            IpVersion::V6 => &self.v6,
        }
    }

    /// Versions whose published address differs from the actual one
    pub fn changed(&self) -> Vec<IpVersion> {
        IpVersion::ALL
            .into_iter()
            .filter(|version| self.get(*version).changed)
            .collect()
    }

    /// True when neither version needs an update
    pub fn is_unchanged(&self) -> bool {
        !self.v4.changed && !self.v6.changed
    }
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Address comparison the decision was based on
    pub addresses: AddressReport,
    /// Update calls made, in order
    pub updates: Vec<(IpVersion, UpdateOutcome)>,
    /// Whether update calls were suppressed
    pub dry_run: bool,
}

impl RunReport {
    /// Versions that needed an update
    pub fn pending(&self) -> Vec<IpVersion> {
        self.addresses.changed()
    }

    /// True when the update service was not needed
    pub fn is_noop(&self) -> bool {
        self.addresses.is_unchanged()
    }
}

/// Core DDNS engine
///
/// ## Lifecycle
///
/// 1. Create with [`DdnsEngine::new()`]
/// 2. Call [`DdnsEngine::run_once()`]
/// 3. Drop
///
/// ## Threading
///
/// Every step is awaited in sequence: the DNS lookups, then the echo
/// requests, then the updates. Nothing overlaps.
pub struct DdnsEngine {
    /// Published-address lookups
    published: Box<dyn PublishedAddressSource>,

    /// Actual-address lookups
    public_ip: Box<dyn PublicIpSource>,

    /// Update client
    updater: Box<dyn UpdateService>,

    /// Hostname to check
    hostname: String,

    /// Update endpoints per version
    endpoints: Endpoints,

    /// Skip update calls, report only
    dry_run: bool,
}

impl DdnsEngine {
    /// Create a new DDNS engine
    ///
    /// # Parameters
    ///
    /// - `published`: Published-address lookup implementation
    /// - `public_ip`: Actual-address lookup implementation
    /// - `updater`: Update service implementation
    /// - `config`: Validated DDNS configuration
    pub fn new(
        published: Box<dyn PublishedAddressSource>,
        public_ip: Box<dyn PublicIpSource>,
        updater: Box<dyn UpdateService>,
        config: &DdnsConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            published,
            public_ip,
            updater,
            hostname: config.hostname.clone(),
            endpoints: config.endpoints.clone(),
            dry_run: false,
        })
    }

    /// Report which versions would be updated without calling the service
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Update endpoint for one IP version
    pub fn update_endpoint(&self, version: IpVersion) -> &str {
        match version {
            IpVersion::V4 => &self.endpoints.v4_update,
            IpVersion::V6 => &self.endpoints.v6_update,
        }
    }

    /// Run one complete pass
    ///
    /// # Returns
    ///
    /// - `Ok(RunReport)`: Addresses compared and all needed updates issued
    /// - `Err(Error)`: Actual-address lookup or an update call failed
    pub async fn run_once(&self) -> Result<RunReport> {
        let published = self.lookup_published().await;
        let actual = self.lookup_actual().await?;
        let addresses = AddressReport::compose(published, actual);

        if addresses.is_unchanged() {
            info!(
                "No update required, IPs are [{}, {}]",
                addresses.v4.actual, addresses.v6.actual
            );
            return Ok(RunReport {
                addresses,
                updates: Vec::new(),
                dry_run: self.dry_run,
            });
        }

        let mut updates = Vec::new();
        for version in addresses.changed() {
            let state = addresses.get(version);
            info!(
                "{} changed for {}: published {:?}, actual {:?}",
                version, self.hostname, state.published, state.actual
            );

            if self.dry_run {
                info!(
                    "Dry run: would call {} at {}",
                    self.updater.service_name(),
                    self.update_endpoint(version)
                );
                continue;
            }

            let outcome = self.updater.update(self.update_endpoint(version)).await?;
            match &outcome {
                UpdateOutcome::Updated(_) | UpdateOutcome::NoChange(_) => {
                    info!("{} update: {}", version, outcome);
                }
                UpdateOutcome::Ambiguous(_) => {
                    warn!("{} update: {}", version, outcome);
                }
            }
            updates.push((version, outcome));
        }

        Ok(RunReport {
            addresses,
            updates,
            dry_run: self.dry_run,
        })
    }

    /// Look up the published addresses
    ///
    /// Never fails: an error or a missing record yields an empty address.
    pub async fn lookup_published(&self) -> PublishedAddresses {
        PublishedAddresses {
            v4: self.lookup_published_version(IpVersion::V4).await,
            v6: self.lookup_published_version(IpVersion::V6).await,
        }
    }

    async fn lookup_published_version(&self, version: IpVersion) -> String {
        match self.published.lookup(&self.hostname, version).await {
            Ok(Some(ip)) => {
                debug!("Published {} for {}: {}", version, self.hostname, ip);
                ip.to_string()
            }
            Ok(None) => {
                warn!("No {} record published for {}", version, self.hostname);
                String::new()
            }
            Err(e) => {
                warn!("{} lookup for {} failed: {}", version, self.hostname, e);
                String::new()
            }
        }
    }

    /// Look up the actual public addresses
    ///
    /// Fails on the first error; the IPv6 lookup is not attempted if the
    /// IPv4 lookup fails.
    pub async fn lookup_actual(&self) -> Result<ActualAddresses> {
        let v4 = self.public_ip.current(IpVersion::V4).await?;
        let v6 = self.public_ip.current(IpVersion::V6).await?;
        debug!("Actual addresses: [{}, {}]", v4, v6);

        Ok(ActualAddresses {
            v4: v4.trim().to_string(),
            v6: v6.trim().to_string(),
        })
    }
}
