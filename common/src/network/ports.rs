//! # Port Range Model
//!
//! An inclusive, validated range of TCP ports.
//!
//! Accepted string forms (for CLI parsing):
//! * A single port: `"443"`.
//! * A dash range: `"1-1024"`.

use std::fmt;
use std::str::FromStr;

use crate::error::ScanError;

/// An inclusive `[start, end]` port range with `1 <= start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    pub fn new(start: u16, end: u16) -> Result<Self, ScanError> {
        if start == 0 || start > end {
            return Err(ScanError::InvalidPortRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, port: u16) -> bool {
        port >= self.start && port <= self.end
    }

    /// Ports in ascending order. Dispatch loops walk this directly.
    pub fn iter(&self) -> impl Iterator<Item = u16> + use<> {
        self.start..=self.end
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for PortRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start_str, end_str) = match s.split_once('-') {
            Some(pair) => pair,
            None => (s, s),
        };

        let start: u16 = start_str
            .trim()
            .parse()
            .map_err(|e| format!("invalid start port '{start_str}': {e}"))?;
        let end: u16 = end_str
            .trim()
            .parse()
            .map_err(|e| format!("invalid end port '{end_str}': {e}"))?;

        Self::new(start, end).map_err(|e| e.to_string())
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
