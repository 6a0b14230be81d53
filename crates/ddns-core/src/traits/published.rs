// # Published Address Source Trait
//
// Defines the interface for reading what DNS currently publishes for a
// hostname.
//
// ## Implementations
//
// - Fixed external resolver over UDP: `ddns-dns-resolver` crate

use async_trait::async_trait;
use std::net::IpAddr;

use super::IpVersion;

/// Trait for published-address lookups
///
/// Errors returned here are never fatal: the engine records the address as
/// empty, which forces an update for that version.
#[async_trait]
pub trait PublishedAddressSource: Send + Sync {
    /// Look up the address published for `hostname`
    ///
    /// # Returns
    ///
    /// - `Ok(Some(IpAddr))`: The published address (last record when several exist)
    /// - `Ok(None)`: No record of this version is published
    /// - `Err(Error)`: The lookup failed or timed out
    async fn lookup(
        &self,
        hostname: &str,
        version: IpVersion,
    ) -> Result<Option<IpAddr>, crate::Error>;
}
