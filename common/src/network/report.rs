//! # Scan Result Model
//!
//! The unified per-port outcome both scan strategies feed into the result
//! stream, plus the strategy selector itself.

use std::fmt;
use std::io;
use std::str::FromStr;

/// Which probing strategy drives the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Full TCP handshake per port. Portable, unprivileged.
    Connect,
    /// Half-open SYN probing over a raw link channel. Requires root.
    Syn,
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMode::Connect => write!(f, "connect"),
            ScanMode::Syn => write!(f, "syn"),
        }
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "connect" => Ok(ScanMode::Connect),
            "syn" => Ok(ScanMode::Syn),
            other => Err(format!("unknown scan mode '{other}' (connect, syn)")),
        }
    }
}

/// Outcome for a single probed port.
///
/// Connect mode produces exactly one of these per port in range. SYN mode
/// produces them only for ports observed open; absence of a result there is
/// a non-observation, not a closed verdict.
#[derive(Debug)]
pub struct ScanResult {
    pub port: u16,
    pub open: bool,
    /// The specific dial error for a failed connect probe.
    pub cause: Option<io::Error>,
}

impl ScanResult {
    pub fn open(port: u16) -> Self {
        Self {
            port,
            open: true,
            cause: None,
        }
    }

    pub fn closed(port: u16, cause: io::Error) -> Self {
        Self {
            port,
            open: false,
            cause: Some(cause),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
