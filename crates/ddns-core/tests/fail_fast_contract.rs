//! Contract Test: Failure Model
//!
//! This test verifies which failures abort a run and which are tolerated.
//!
//! Constraints verified:
//! - Published-address lookup failures degrade to an empty address
//! - Actual-address lookup failures abort before any update
//! - The first failed update aborts the remaining ones
//!
//! If this test fails, a run may update DNS from incomplete information.

mod common;

use common::*;
use ddns_core::config::DEFAULT_V4_UPDATE_URL;
use ddns_core::{DdnsEngine, Error, IpVersion};

#[tokio::test]
async fn published_lookup_failure_becomes_empty_address() {
    let updater = MockUpdateService::new();

    let engine = DdnsEngine::new(
        Box::new(FailingPublishedSource),
        Box::new(StaticPublicIpSource::new("1.2.3.4", "::1")),
        Box::new(MockUpdateService::sharing_counters_with(&updater)),
        &minimal_config("h.example"),
    )
    .expect("engine construction succeeds");

    let published = engine.lookup_published().await;
    assert_eq!(published.v4, "");
    assert_eq!(published.v6, "");

    // First-ever run: nothing published yet, both versions get updated
    let report = engine.run_once().await.expect("lookup failure is not fatal");
    assert_eq!(report.pending(), vec![IpVersion::V4, IpVersion::V6]);
    assert_eq!(updater.update_call_count(), 2);
}

#[tokio::test]
async fn published_lookup_asks_for_both_versions() {
    let published = StaticPublishedSource::new(Some(ip("1.2.3.4")), Some(ip("::1")));

    let engine = DdnsEngine::new(
        Box::new(StaticPublishedSource::sharing_counters_with(&published)),
        Box::new(StaticPublicIpSource::new("1.2.3.4", "::1")),
        Box::new(MockUpdateService::new()),
        &minimal_config("h.example"),
    )
    .expect("engine construction succeeds");

    let addresses = engine.lookup_published().await;
    assert_eq!(addresses.v4, "1.2.3.4");
    assert_eq!(addresses.v6, "::1");
    assert_eq!(published.lookup_call_count(), 2);
}

#[tokio::test]
async fn actual_v4_failure_aborts_without_updates() {
    let updater = MockUpdateService::new();
    let public_ip = StaticPublicIpSource::new("1.2.3.4", "::1").failing_on(IpVersion::V4);

    let engine = DdnsEngine::new(
        Box::new(StaticPublishedSource::empty()),
        Box::new(StaticPublicIpSource::sharing_counters_with(&public_ip)),
        Box::new(MockUpdateService::sharing_counters_with(&updater)),
        &minimal_config("h.example"),
    )
    .expect("engine construction succeeds");

    let err = engine.run_once().await.unwrap_err();

    assert!(matches!(err, Error::Network(_)));
    assert_eq!(public_ip.current_call_count(), 1, "IPv6 lookup skipped after IPv4 failure");
    assert_eq!(updater.update_call_count(), 0, "No partial update");
}

#[tokio::test]
async fn actual_v6_failure_aborts_without_updates() {
    let updater = MockUpdateService::new();

    let engine = DdnsEngine::new(
        Box::new(StaticPublishedSource::empty()),
        Box::new(StaticPublicIpSource::new("1.2.3.4", "::1").failing_on(IpVersion::V6)),
        Box::new(MockUpdateService::sharing_counters_with(&updater)),
        &minimal_config("h.example"),
    )
    .expect("engine construction succeeds");

    assert!(engine.run_once().await.is_err());
    assert_eq!(
        updater.update_call_count(),
        0,
        "IPv4 changed but must not be updated when IPv6 lookup failed"
    );
}

#[tokio::test]
async fn badauth_aborts_remaining_updates() {
    let updater =
        MockUpdateService::with_response(MockResponse::Status(401, "badauth".to_string()));

    let engine = DdnsEngine::new(
        Box::new(StaticPublishedSource::empty()),
        Box::new(StaticPublicIpSource::new("1.2.3.4", "::1")),
        Box::new(MockUpdateService::sharing_counters_with(&updater)),
        &minimal_config("h.example"),
    )
    .expect("engine construction succeeds");

    let err = engine.run_once().await.unwrap_err();

    match err {
        Error::Remote { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("badauth"));
        }
        other => panic!("expected remote error, got {:?}", other),
    }
    assert_eq!(updater.update_call_count(), 1, "IPv6 update skipped after failure");
    assert_eq!(updater.endpoints(), vec![DEFAULT_V4_UPDATE_URL.to_string()]);
}

#[tokio::test]
async fn actual_addresses_are_trimmed() {
    let engine = DdnsEngine::new(
        Box::new(StaticPublishedSource::new(Some(ip("1.2.3.4")), None)),
        Box::new(StaticPublicIpSource::new("1.2.3.4\n", "")),
        Box::new(MockUpdateService::new()),
        &minimal_config("h.example"),
    )
    .expect("engine construction succeeds");

    let report = engine.run_once().await.expect("run succeeds");
    assert_eq!(report.addresses.v4.actual, "1.2.3.4");
    assert!(report.is_noop());
}
