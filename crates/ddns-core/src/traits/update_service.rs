// # Update Service Trait
//
// Defines the interface for notifying the dynamic DNS service that an
// address changed.
//
// ## Implementations
//
// - nsupdate.info / dyndns2 protocol: `ddns-provider-nsupdate` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::UpdateService;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let service = /* UpdateService implementation */;
//
//     let outcome = service.update("https://ipv4.nsupdate.info/nic/update").await?;
//     println!("{}", outcome);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::fmt;

/// Outcome of a successful update call
///
/// Each variant carries the raw response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Service accepted the new address (`good ...`)
    Updated(String),
    /// Service already had this address (`nochg ...`)
    NoChange(String),
    /// Success status but an unrecognised body
    ///
    /// Surfaced separately so callers can tell it apart from a confirmed
    /// update; it may hide a service-side error.
    Ambiguous(String),
}

impl UpdateOutcome {
    /// Classify a response body received with a success status
    pub fn from_body(body: impl Into<String>) -> Self {
        let body = body.into();
        if body.starts_with("good") {
            Self::Updated(body)
        } else if body.starts_with("nochg") {
            Self::NoChange(body)
        } else {
            Self::Ambiguous(body)
        }
    }

    /// Raw response body
    pub fn body(&self) -> &str {
        match self {
            Self::Updated(body) | Self::NoChange(body) | Self::Ambiguous(body) => body,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated(body) => write!(f, "Success: {}", body.trim_end()),
            Self::NoChange(body) => write!(f, "No change: {}", body.trim_end()),
            Self::Ambiguous(body) => write!(f, "Unrecognised response: {}", body.trim_end()),
        }
    }
}

/// Trait for update service implementations
///
/// # Trust Level: Untrusted
///
/// Update services are isolated and single-shot:
/// - One HTTP request per call, no retry or backoff
/// - No decision about whether an update is needed (owned by `DdnsEngine`)
/// - Credentials never appear in logs or `Debug` output
#[async_trait]
pub trait UpdateService: Send + Sync {
    /// Notify the service through `endpoint`
    ///
    /// The service infers the new address from the connection's origin, so
    /// the endpoint chosen decides which record (A or AAAA) is updated.
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateOutcome)`: Success status; body classified
    /// - `Err(Error::Network)`: Transport failure
    /// - `Err(Error::Remote)`: Non-success status, body attached
    async fn update(&self, endpoint: &str) -> Result<UpdateOutcome, crate::Error>;

    /// Get the service name (for logging)
    fn service_name(&self) -> &'static str;
}
