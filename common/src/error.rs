//! Error taxonomy shared across the workspace.
//!
//! Only fatal, pre-scan conditions live here. Per-port connect failures are
//! surfaced as negative [`ScanResult`](crate::network::report::ScanResult)s,
//! and per-packet send/decode failures in SYN mode are recovered locally and
//! never reach the caller.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// Port range failed validation. Ports are 1-65535, start <= end.
    #[error("invalid port range {start}-{end} (expected 1 <= start <= end <= 65535)")]
    InvalidPortRange { start: u16, end: u16 },

    #[error("network interface '{0}' not found")]
    InterfaceNotFound(String),

    /// The interface exists but is missing a MAC or IPv4 address.
    #[error("network interface '{0}' has no usable IPv4/MAC configuration")]
    InterfaceUnusable(String),

    /// The target is off-link and no gateway could be determined.
    #[error("target is not on the local subnet; supply a gateway explicitly")]
    GatewayRequired,

    /// The single-shot ARP request went unanswered within its budget.
    #[error("address resolution timed out after {0:?}")]
    ResolutionTimeout(Duration),

    #[error("half-open scanning requires root privileges")]
    PrivilegeRequired,

    /// The run was interrupted before the operation could complete.
    #[error("operation cancelled")]
    Cancelled,
}
