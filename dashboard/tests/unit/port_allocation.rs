//! Port allocator and negotiation tests.

#![allow(clippy::unwrap_used)]

use nlq_dashboard::application::services::port_allocation::{
    NegotiatedPort, PortCheck, allocate, check_current, list_alternatives, negotiate,
};
use nlq_dashboard::domain::PortError;

use crate::mocks::FixedPortProbe;

// ── allocate ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_allocate_returns_start_when_free() {
    let probe = FixedPortProbe::default();
    assert_eq!(allocate(&probe, 3002, 10).await, Some(3002));
    assert_eq!(probe.probed(), vec![3002]);
}

#[tokio::test]
async fn test_allocate_skips_busy_ports_in_order() {
    let probe = FixedPortProbe::busy([3002, 3003]);
    assert_eq!(allocate(&probe, 3002, 10).await, Some(3004));
    assert_eq!(probe.probed(), vec![3002, 3003, 3004]);
}

#[tokio::test]
async fn test_allocate_exhausted_returns_none() {
    let probe = FixedPortProbe::busy(3002..3005);
    assert_eq!(allocate(&probe, 3002, 3).await, None);
    assert_eq!(probe.probed(), vec![3002, 3003, 3004]);
}

#[tokio::test]
async fn test_allocate_stops_at_highest_port() {
    let probe = FixedPortProbe::busy([65534, 65535]);
    assert_eq!(allocate(&probe, 65534, 10).await, None);
    assert_eq!(probe.probed(), vec![65534, 65535]);
}

// ── list_alternatives ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_alternatives_probe_every_candidate() {
    let probe = FixedPortProbe::busy([3002, 3004]);
    assert_eq!(
        list_alternatives(&probe, 3002, 5).await,
        vec![3003, 3005, 3006, 3007]
    );
    assert_eq!(probe.probed(), vec![3003, 3004, 3005, 3006, 3007]);
}

// ── check_current / negotiate ─────────────────────────────────────────────────

#[tokio::test]
async fn test_check_current_reports_default_port() {
    let probe = FixedPortProbe::default();
    let negotiated = NegotiatedPort::new(3002);
    assert_eq!(
        check_current(&probe, &negotiated, "172.17.0.1").await,
        PortCheck::Available {
            available: true,
            port: 3002,
            host: "172.17.0.1".to_string(),
            url: "http://172.17.0.1:3002".to_string(),
        }
    );
    assert!(!negotiated.is_negotiated());
}

#[tokio::test]
async fn test_check_current_offers_at_most_five_alternatives() {
    let probe = FixedPortProbe::busy([3002]);
    let negotiated = NegotiatedPort::new(3002);
    assert_eq!(
        check_current(&probe, &negotiated, "localhost").await,
        PortCheck::Occupied {
            available: false,
            port: 3002,
            alternatives: vec![3003, 3004, 3005, 3006, 3007],
            suggested: Some(3003),
        }
    );
}

#[tokio::test]
async fn test_check_current_scans_past_busy_window() {
    let probe = FixedPortProbe::busy(3002..=3009);
    let negotiated = NegotiatedPort::new(3002);
    assert_eq!(
        check_current(&probe, &negotiated, "localhost").await,
        PortCheck::Occupied {
            available: false,
            port: 3002,
            alternatives: vec![],
            suggested: Some(3010),
        }
    );
}

#[tokio::test]
async fn test_negotiate_adopts_free_port() {
    let probe = FixedPortProbe::default();
    let negotiated = NegotiatedPort::new(3002);
    assert_eq!(negotiate(&probe, &negotiated, 3010).await, Ok(3010));
    assert_eq!(negotiated.get(), 3010);
}

#[tokio::test]
async fn test_negotiate_rejects_busy_port_and_keeps_previous() {
    let probe = FixedPortProbe::busy([3010, 3011]);
    let negotiated = NegotiatedPort::new(3002);
    let err = negotiate(&probe, &negotiated, 3010).await.unwrap_err();
    assert_eq!(
        err,
        PortError::InUse {
            port: 3010,
            alternatives: vec![3012, 3013, 3014, 3015],
        }
    );
    assert_eq!(negotiated.get(), 3002);
}
