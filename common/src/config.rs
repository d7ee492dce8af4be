use std::net::Ipv4Addr;
use std::time::Duration;

use crate::network::report::ScanMode;
use crate::network::target::ScanTarget;

/// Fully validated inputs for one scan run.
///
/// Assembled by the CLI layer and handed to the core as a value; the core
/// never reads ambient process state for any of these.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub target: ScanTarget,
    pub mode: ScanMode,
    /// Admission ceiling for simultaneous connect probes.
    pub concurrency: usize,
    /// Per-attempt handshake timeout (connect mode).
    pub timeout: Duration,
    /// SYN transmit pace in packets per second.
    pub rate: u32,
    /// Interface carrying the raw channel. Required for SYN mode.
    pub interface: Option<String>,
    /// Explicit next-hop gateway for off-link SYN targets.
    pub gateway: Option<Ipv4Addr>,
}
