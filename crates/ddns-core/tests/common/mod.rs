//! Test doubles and common utilities for engine contract tests
//!
//! This module provides minimal test doubles that record how the engine
//! drives its collaborators without touching the network.

#![allow(dead_code)]

use ddns_core::error::{Error, Result};
use ddns_core::traits::{
    IpVersion, PublicIpSource, PublishedAddressSource, UpdateOutcome, UpdateService,
};
use ddns_core::DdnsConfig;
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A published-address source answering from fixed values
pub struct StaticPublishedSource {
    v4: Option<IpAddr>,
    v6: Option<IpAddr>,
    /// Call counter for lookup()
    lookup_call_count: Arc<AtomicUsize>,
}

impl StaticPublishedSource {
    pub fn new(v4: Option<IpAddr>, v6: Option<IpAddr>) -> Self {
        Self {
            v4,
            v6,
            lookup_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Nothing published for either version
    pub fn empty() -> Self {
        Self::new(None, None)
    }

    /// Get the number of times lookup() was called
    pub fn lookup_call_count(&self) -> usize {
        self.lookup_call_count.load(Ordering::SeqCst)
    }

    /// Create a new StaticPublishedSource that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            v4: other.v4,
            v6: other.v6,
            lookup_call_count: Arc::clone(&other.lookup_call_count),
        }
    }
}

#[async_trait::async_trait]
impl PublishedAddressSource for StaticPublishedSource {
    async fn lookup(&self, _hostname: &str, version: IpVersion) -> Result<Option<IpAddr>> {
        self.lookup_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(match version {
            IpVersion::V4 => self.v4,
            IpVersion::V6 => self.v6,
        })
    }
}

/// A published-address source whose lookups always fail (resolver down)
pub struct FailingPublishedSource;

#[async_trait::async_trait]
impl PublishedAddressSource for FailingPublishedSource {
    async fn lookup(&self, hostname: &str, version: IpVersion) -> Result<Option<IpAddr>> {
        Err(Error::network(format!(
            "{} lookup for {} timed out",
            version, hostname
        )))
    }
}

/// A public IP source answering from fixed strings
pub struct StaticPublicIpSource {
    v4: String,
    v6: String,
    /// Version whose lookup fails, if any
    failing: Option<IpVersion>,
    /// Call counter for current()
    current_call_count: Arc<AtomicUsize>,
}

impl StaticPublicIpSource {
    pub fn new(v4: impl Into<String>, v6: impl Into<String>) -> Self {
        Self {
            v4: v4.into(),
            v6: v6.into(),
            failing: None,
            current_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make lookups for `version` fail with a network error
    pub fn failing_on(mut self, version: IpVersion) -> Self {
        self.failing = Some(version);
        self
    }

    /// Get the number of times current() was called
    pub fn current_call_count(&self) -> usize {
        self.current_call_count.load(Ordering::SeqCst)
    }

    /// Create a new StaticPublicIpSource that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            v4: other.v4.clone(),
            v6: other.v6.clone(),
            failing: other.failing,
            current_call_count: Arc::clone(&other.current_call_count),
        }
    }
}

#[async_trait::async_trait]
impl PublicIpSource for StaticPublicIpSource {
    async fn current(&self, version: IpVersion) -> Result<String> {
        self.current_call_count.fetch_add(1, Ordering::SeqCst);
        if self.failing == Some(version) {
            return Err(Error::network("echo service unreachable"));
        }
        Ok(match version {
            IpVersion::V4 => self.v4.clone(),
            IpVersion::V6 => self.v6.clone(),
        })
    }
}

/// How the mock update service answers
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Success status with this body
    Body(String),
    /// Non-success status with this body
    Status(u16, String),
}

/// A mock UpdateService that records every endpoint it was called with
pub struct MockUpdateService {
    response: MockResponse,
    /// Call counter for update()
    update_call_count: Arc<AtomicUsize>,
    /// Endpoints passed to update(), in order
    endpoints: Arc<std::sync::Mutex<Vec<String>>>,
}

impl MockUpdateService {
    /// Service answering `good <ip>` to every call
    pub fn new() -> Self {
        Self::with_response(MockResponse::Body("good 203.0.113.7".to_string()))
    }

    pub fn with_response(response: MockResponse) -> Self {
        Self {
            response,
            update_call_count: Arc::new(AtomicUsize::new(0)),
            endpoints: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    /// Get the number of times update() was called
    pub fn update_call_count(&self) -> usize {
        self.update_call_count.load(Ordering::SeqCst)
    }

    /// Get the endpoints update() was called with
    pub fn endpoints(&self) -> Vec<String> {
        self.endpoints.lock().unwrap().clone()
    }

    /// Create a new MockUpdateService that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            response: other.response.clone(),
            update_call_count: Arc::clone(&other.update_call_count),
            endpoints: Arc::clone(&other.endpoints),
        }
    }
}

#[async_trait::async_trait]
impl UpdateService for MockUpdateService {
    async fn update(&self, endpoint: &str) -> Result<UpdateOutcome> {
        self.update_call_count.fetch_add(1, Ordering::SeqCst);
        self.endpoints.lock().unwrap().push(endpoint.to_string());

        match &self.response {
            MockResponse::Body(body) => Ok(UpdateOutcome::from_body(body.clone())),
            MockResponse::Status(status, body) => Err(Error::remote(*status, body.clone())),
        }
    }

    fn service_name(&self) -> &'static str {
        "mock"
    }
}

/// Helper to create a minimal DdnsConfig for testing
pub fn minimal_config(hostname: &str) -> DdnsConfig {
    DdnsConfig::new("test-user", "test-password", hostname)
}

/// Parse an IP literal
pub fn ip(s: &str) -> IpAddr {
    s.parse().expect("valid IP literal")
}
