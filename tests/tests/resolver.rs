//! Live-link resolver checks. These need root and a real interface, so they
//! only run when asked for explicitly (`cargo test -- --ignored`).

use tokio_util::sync::CancellationToken;

use sweepr_common::network::interface;
use sweepr_core::scanner::resolver;

#[test]
#[ignore]
fn unanswered_arp_request_times_out() {
    let intf = interface::auto_select().expect("a usable interface");
    let unreachable = "203.0.113.1".parse().unwrap();

    let err = resolver::resolve_mac(&intf, unreachable, &CancellationToken::new()).unwrap_err();
    assert!(err.to_string().contains("timed out"), "got: {err:?}");
}

#[test]
#[ignore]
fn resolving_the_gateway_twice_is_idempotent() {
    let intf = interface::auto_select().expect("a usable interface");
    let gateway = interface::next_hop_ip(&intf, "203.0.113.1".parse().unwrap(), None).unwrap();
    let cancel = CancellationToken::new();

    let first = resolver::resolve_mac(&intf, gateway, &cancel).expect("gateway resolves");
    let second = resolver::resolve_mac(&intf, gateway, &cancel).expect("gateway resolves");
    assert_eq!(first, second);
}
