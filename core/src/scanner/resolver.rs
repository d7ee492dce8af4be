//! Link-layer address resolution via a single broadcast ARP request.
//!
//! Deliberately one-shot: no retransmission, no backoff. The SYN path only
//! needs the next hop's MAC once, before the run starts, and an unanswered
//! request within the budget is a hard [`ScanError::ResolutionTimeout`].

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use pnet::datalink::{MacAddr, NetworkInterface};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use sweepr_common::error::ScanError;
use sweepr_common::network::interface::NetworkInterfaceExtension;
use sweepr_protocols::arp;

use crate::network::channel;

const ARP_BUDGET: Duration = Duration::from_secs(2);

/// Resolves the hardware address of `query_ip`, which must be reachable
/// directly on `intf`'s link.
///
/// Opens its own short-lived capture; the SYN engine opens a second one for
/// probe traffic. Blocking: call from a blocking context or through
/// `spawn_blocking`.
pub fn resolve_mac(
    intf: &NetworkInterface,
    query_ip: Ipv4Addr,
    cancel: &CancellationToken,
) -> anyhow::Result<MacAddr> {
    let src_mac = intf
        .mac
        .ok_or_else(|| ScanError::InterfaceUnusable(intf.name.clone()))?;
    let src_ip = intf
        .get_ipv4_addr()
        .ok_or_else(|| ScanError::InterfaceUnusable(intf.name.clone()))?;

    let (mut tx, mut rx) = channel::open_raw(intf)?;

    let request = arp::request(src_mac, src_ip, query_ip)?;
    match tx.send_to(&request, None) {
        Some(Ok(())) => {}
        Some(Err(e)) => return Err(anyhow::Error::new(e).context("sending ARP request")),
        None => anyhow::bail!("datalink channel refused the ARP request"),
    }
    debug!("ARP who-has {query_ip} broadcast on {}", intf.name);

    let deadline = Instant::now() + ARP_BUDGET;
    while Instant::now() < deadline {
        if cancel.is_cancelled() {
            return Err(ScanError::Cancelled.into());
        }
        match rx.next() {
            Ok(frame) => {
                // Unrelated and malformed frames are skipped, not errors.
                if let Some(mac) = arp::reply_mac(frame, query_ip) {
                    return Ok(mac);
                }
            }
            // Read timeout; loop around so the deadline and the
            // cancellation signal stay observed.
            Err(_) => continue,
        }
    }

    Err(ScanError::ResolutionTimeout(ARP_BUDGET).into())
}
