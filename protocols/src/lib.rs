//! Raw packet construction and decoding for the scan engine.
//!
//! Every builder writes into a fixed-size buffer and recomputes lengths and
//! checksums per frame; nothing here touches the wire.

pub mod arp;
pub mod ethernet;
pub mod ipv4;
pub mod tcp;

pub const ETH_HDR_LEN: usize = 14;
pub const ARP_LEN: usize = 28;
pub const IPV4_HDR_LEN: usize = 20;
pub const TCP_HDR_LEN: usize = 20;
/// Shortest valid Ethernet frame, excluding the trailing FCS.
pub const MIN_ETH_FRAME_NO_FCS: usize = 60;
