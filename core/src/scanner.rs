//! The central **abstraction** for port scanning strategies.
//!
//! Both strategies share one capability: produce a stream of
//! [`ScanResult`]s for a port range. The connect prober walks the range with
//! full TCP handshakes; the SYN engine sends half-open probes over a raw
//! link channel. Callers depend on [`ScanStrategy`] and consume the stream
//! without caring which technique is underneath.
//!
//! The two strategies differ deliberately in completeness: connect mode
//! yields exactly one result per port, SYN mode yields results only for
//! ports observed open.

use std::net::Ipv4Addr;

use pnet::datalink::{MacAddr, NetworkInterface};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use sweepr_common::error::ScanError;
use sweepr_common::network::interface::NetworkInterfaceExtension;
use sweepr_common::network::ports::PortRange;
use sweepr_common::network::report::ScanResult;

pub mod connect;
mod pacer;
pub mod resolver;
pub mod syn;

pub use connect::ConnectScanner;
pub use syn::SynScanner;

/// Everything the raw probe engine needs to address frames on the link.
///
/// Computed once before a SYN run starts and owned by the engine for the
/// run's duration.
#[derive(Debug, Clone)]
pub struct ResolvedLink {
    pub interface: NetworkInterface,
    pub src_ip: Ipv4Addr,
    pub src_mac: MacAddr,
    /// The target's own MAC when on-link, otherwise a gateway's.
    pub next_hop_mac: MacAddr,
}

impl ResolvedLink {
    pub fn new(interface: NetworkInterface, next_hop_mac: MacAddr) -> Result<Self, ScanError> {
        let src_mac = interface
            .mac
            .ok_or_else(|| ScanError::InterfaceUnusable(interface.name.clone()))?;
        let src_ip = interface
            .get_ipv4_addr()
            .ok_or_else(|| ScanError::InterfaceUnusable(interface.name.clone()))?;

        Ok(Self {
            interface,
            src_ip,
            src_mac,
            next_hop_mac,
        })
    }
}

/// A configured scan, ready to run.
pub enum ScanStrategy {
    Connect(ConnectScanner),
    Syn(SynScanner),
}

impl ScanStrategy {
    /// Starts the scan and hands back the live result stream. The stream
    /// closes once the run completes or cancellation has fully propagated.
    pub fn start(
        self,
        ports: PortRange,
        cancel: CancellationToken,
    ) -> UnboundedReceiver<ScanResult> {
        match self {
            ScanStrategy::Connect(scanner) => scanner.scan(ports, cancel),
            ScanStrategy::Syn(scanner) => scanner.start(ports, cancel),
        }
    }
}
