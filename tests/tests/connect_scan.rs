//! End-to-end connect scans over loopback.

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use sweepr_common::network::ports::PortRange;
use sweepr_common::network::report::ScanMode;
use sweepr_core::scanner::{ConnectScanner, ScanStrategy};
use sweepr_integration_tests::collect;

const LOCALHOST: Ipv4Addr = Ipv4Addr::LOCALHOST;

#[tokio::test]
async fn hundred_port_sweep_is_complete() {
    let scanner = ConnectScanner::new(LOCALHOST, Duration::from_millis(50), 50);
    let range = PortRange::new(1, 100).unwrap();
    let strategy = ScanStrategy::Connect(scanner);

    let results = collect(strategy.start(range, CancellationToken::new())).await;

    assert_eq!(results.len(), 100);
    let ports: HashSet<u16> = results.iter().map(|r| r.port).collect();
    assert_eq!(ports.len(), 100, "every port reports exactly once");
    assert!(ports.iter().all(|p| range.contains(*p)));
}

#[tokio::test]
async fn six_port_window_finds_the_listener() {
    let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
    let open_port = listener.local_addr().unwrap().port();
    let range = PortRange::new(open_port - 2, open_port + 3).unwrap();

    let scanner = ConnectScanner::new(LOCALHOST, Duration::from_millis(200), 50);
    let results = collect(scanner.scan(range, CancellationToken::new())).await;

    assert_eq!(results.len(), 6);
    let hits: Vec<_> = results.iter().filter(|r| r.port == open_port).collect();
    assert_eq!(hits.len(), 1);
    assert!(hits[0].open);
}

#[tokio::test]
async fn results_arrive_in_completion_order_not_port_order() {
    // Not a strict assertion on ordering (latency decides that), only that
    // the stream closes exactly when the last result is in.
    let scanner = ConnectScanner::new(LOCALHOST, Duration::from_millis(50), 10);
    let range = PortRange::new(40000, 40019).unwrap();

    let results = collect(scanner.scan(range, CancellationToken::new())).await;
    assert_eq!(results.len(), 20);
}

#[test]
fn inverted_range_fails_before_any_probing() {
    let err = PortRange::new(100, 50).unwrap_err();
    assert!(err.to_string().contains("invalid port range 100-50"));
}

#[test]
fn mode_selector_round_trips() {
    assert_eq!("connect".parse::<ScanMode>().unwrap(), ScanMode::Connect);
    assert_eq!("syn".parse::<ScanMode>().unwrap(), ScanMode::Syn);
}

#[tokio::test]
async fn cancelled_scan_yields_an_empty_closed_stream() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let scanner = ConnectScanner::new(LOCALHOST, Duration::from_millis(50), 10);
    let range = PortRange::new(1, 500).unwrap();

    let results = collect(scanner.scan(range, cancel)).await;
    assert!(results.is_empty());
}
