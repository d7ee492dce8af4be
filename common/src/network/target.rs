//! # Scan Target Model
//!
//! One IPv4 host plus the port window to sweep. Immutable for the whole run.

use std::fmt;
use std::net::Ipv4Addr;

use crate::network::ports::PortRange;

#[derive(Debug, Clone, Copy)]
pub struct ScanTarget {
    pub addr: Ipv4Addr,
    pub ports: PortRange,
}

impl ScanTarget {
    pub fn new(addr: Ipv4Addr, ports: PortRange) -> Self {
        Self { addr, ports }
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.addr, self.ports)
    }
}
