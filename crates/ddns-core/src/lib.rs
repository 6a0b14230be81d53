// # ddns-core
//
// Core library for the one-shot DDNS updater.
//
// ## Architecture Overview
//
// This library provides the core functionality for a single update pass:
// - **PublishedAddressSource**: Trait for reading what DNS publishes for the hostname
// - **PublicIpSource**: Trait for discovering the host's actual public addresses
// - **UpdateService**: Trait for notifying the dynamic DNS service
// - **DdnsEngine**: Compares published and actual addresses, updates what differs
// - **HttpFetcher**: Shared GET helper for the HTTP-based implementations
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Decision logic is separate from I/O implementations
// 2. **Sequential**: One lookup or request at a time, no background tasks
// 3. **Stateless**: Every run re-derives both addresses from scratch
// 4. **Library-First**: The binary is a thin wiring layer

pub mod traits;
pub mod engine;
pub mod config;
pub mod error;
pub mod http;

// Re-export core types for convenience
pub use traits::{IpVersion, PublicIpSource, PublishedAddressSource, UpdateOutcome, UpdateService};
pub use engine::{AddressReport, AddressState, DdnsEngine, RunReport};
pub use config::{DdnsConfig, Endpoints};
pub use error::{Error, Result};
pub use http::HttpFetcher;
