//! Core traits for the DDNS updater
//!
//! This module defines the abstract interfaces the engine is wired with.
//!
//! - [`PublishedAddressSource`]: What DNS currently publishes for a hostname
//! - [`PublicIpSource`]: What the outside world sees as this host's address
//! - [`UpdateService`]: Notify the dynamic DNS service of a change

pub mod ip_source;
pub mod published;
pub mod update_service;

pub use ip_source::{IpVersion, PublicIpSource};
pub use published::PublishedAddressSource;
pub use update_service::{UpdateOutcome, UpdateService};
