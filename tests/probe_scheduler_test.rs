#![cfg(unix)]

use pacs_server_monitor::common::liveness::{PortState, Reachability};
use pacs_server_monitor::common::server::ServerDescriptor;
use pacs_server_monitor::probe::ProbeSettings;
use pacs_server_monitor::probe::scheduler::{ProbeScheduler, RefreshOutcome};
use pacs_server_monitor::probe::status_cache::StatusCache;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;

fn settings(ping_program: &str) -> ProbeSettings {
    ProbeSettings {
        ping_program: ping_program.to_string(),
        ping_timeout: Some(Duration::from_secs(2)),
        connect_timeout: Duration::from_secs(2),
    }
}

#[tokio::test]
async fn reachable_host_without_ports() {
    let cache = Arc::new(StatusCache::new());
    let scheduler = ProbeScheduler::new(cache.clone(), settings("true"));
    let server = ServerDescriptor::new("A", "127.0.0.1");

    assert_eq!(cache.get_reachability("127.0.0.1"), Reachability::Unknown);
    let outcome = scheduler.refresh_one(&server).await;

    assert_eq!(outcome, RefreshOutcome::Completed { probed: 1 });
    assert_eq!(cache.get_reachability("127.0.0.1"), Reachability::Reachable);
    assert!(cache.get_record("127.0.0.1").unwrap().port_states.is_empty());
}

#[tokio::test]
async fn unreachable_host_is_stable_across_refreshes() {
    let cache = Arc::new(StatusCache::new());
    let scheduler = ProbeScheduler::new(cache.clone(), settings("false"));
    let server = ServerDescriptor::new("down", "10.255.255.1");

    scheduler.refresh_one(&server).await;
    let first = cache.get_record("10.255.255.1").unwrap();
    scheduler.refresh_one(&server).await;
    let second = cache.get_record("10.255.255.1").unwrap();

    assert_eq!(first.reachable, Reachability::Unreachable);
    assert_eq!(first.reachable, second.reachable);
    assert_eq!(first.port_states, second.port_states);
}

#[tokio::test]
async fn non_routable_host_with_real_ping_is_unreachable() {
    let cache = Arc::new(StatusCache::new());
    let scheduler = ProbeScheduler::new(cache.clone(), settings("ping"));
    let server = ServerDescriptor::new("void", "10.255.255.1");

    scheduler.refresh_one(&server).await;

    assert_eq!(cache.get_reachability("10.255.255.1"), Reachability::Unreachable);
}

#[tokio::test]
async fn refresh_all_writes_every_server_and_notifies_once() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open_port = listener.local_addr().unwrap().port();

    let notified = Arc::new(AtomicUsize::new(0));
    let counter = notified.clone();
    let cache = Arc::new(StatusCache::new());
    let scheduler = ProbeScheduler::new(cache.clone(), settings("true")).with_refresh_callback(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let servers = vec![
        ServerDescriptor::new("local", "127.0.0.1")
            .with_port(open_port, "api")
            .with_port(1, "reserved"),
        ServerDescriptor::new("loopback-alias", "localhost"),
    ];
    let outcome = scheduler.refresh_all(&servers).await;

    assert_eq!(outcome, RefreshOutcome::Completed { probed: 2 });
    assert_eq!(notified.load(Ordering::SeqCst), 1);
    assert_eq!(cache.get_port_state("127.0.0.1", open_port), PortState::Open);
    assert_eq!(cache.get_port_state("127.0.0.1", 1), PortState::Closed);
    assert_eq!(cache.get_reachability("localhost"), Reachability::Reachable);
    assert_eq!(cache.get_port_state("localhost", 80), PortState::Unknown);
}

#[tokio::test]
async fn failed_probe_flips_previous_state() {
    let cache = Arc::new(StatusCache::new());
    let server = ServerDescriptor::new("A", "127.0.0.1");

    ProbeScheduler::new(cache.clone(), settings("true")).refresh_one(&server).await;
    assert_eq!(cache.get_reachability("127.0.0.1"), Reachability::Reachable);

    ProbeScheduler::new(cache.clone(), settings("false")).refresh_one(&server).await;
    assert_eq!(cache.get_reachability("127.0.0.1"), Reachability::Unreachable);
}
