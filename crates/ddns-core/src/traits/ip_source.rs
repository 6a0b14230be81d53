// # Public IP Source Trait
//
// Defines the interface for discovering the host's actual public address,
// as observed by a third party.
//
// ## Implementations
//
// - HTTP echo services: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::{IpVersion, PublicIpSource};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* PublicIpSource implementation */;
//
//     let v4 = source.current(IpVersion::V4).await?;
//     println!("Public IPv4: {}", v4);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::fmt;

/// IP version (v4 or v6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Both versions, in the order the engine processes them
    pub const ALL: [IpVersion; 2] = [IpVersion::V4, IpVersion::V6];
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpVersion::V4 => f.write_str("IPv4"),
            IpVersion::V6 => f.write_str("IPv6"),
        }
    }
}

/// Trait for public IP source implementations
///
/// A source answers with the address a remote observer sees for this host.
/// Any failure is fatal to the run: the engine never updates DNS from a
/// guess.
///
/// Implementations make exactly one request per call and never retry.
#[async_trait]
pub trait PublicIpSource: Send + Sync {
    /// Get the current public address for the given IP version
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The address as reported, surrounding whitespace trimmed
    /// - `Err(Error)`: Network failure or non-success status
    async fn current(&self, version: IpVersion) -> Result<String, crate::Error>;
}
