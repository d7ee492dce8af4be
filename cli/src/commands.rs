pub mod scan;

use std::net::Ipv4Addr;

use clap::Parser;
use sweepr_common::network::ports::PortRange;
use sweepr_common::network::report::ScanMode;

#[derive(Parser)]
#[command(name = "sweepr")]
#[command(about = "A fast single-host TCP port scanner.")]
pub struct CommandLine {
    /// Target IPv4 address
    pub target: Ipv4Addr,

    /// Ports to scan, e.g. "443" or "1-1024"
    #[arg(short, long, default_value = "1-1024")]
    pub ports: PortRange,

    /// Scan strategy: connect (default) or syn (requires root)
    #[arg(short, long, default_value = "connect")]
    pub mode: ScanMode,

    /// Maximum simultaneous connect probes
    #[arg(short, long, default_value_t = 2000)]
    pub concurrency: usize,

    /// Per-attempt handshake timeout in milliseconds
    #[arg(short, long, default_value_t = 200)]
    pub timeout: u64,

    /// SYN transmit rate in packets per second
    #[arg(short, long, default_value_t = 5000)]
    pub rate: u32,

    /// Interface carrying SYN traffic (auto-selected when omitted)
    #[arg(short, long)]
    pub interface: Option<String>,

    /// Gateway IPv4 address for off-link SYN targets
    #[arg(short, long)]
    pub gateway: Option<Ipv4Addr>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
