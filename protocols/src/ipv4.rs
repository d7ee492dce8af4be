use std::net::Ipv4Addr;

use anyhow::Context;
use pnet::packet::Packet;
use pnet::packet::ethernet::EtherTypes;
use pnet::packet::ip::IpNextHeaderProtocol;
use pnet::packet::ipv4::{Ipv4Packet, MutableIpv4Packet, checksum};

use crate::{IPV4_HDR_LEN, ethernet};

pub fn make_header(
    buf: &mut [u8],
    payload_len: usize,
    next_protocol: IpNextHeaderProtocol,
    src_addr: Ipv4Addr,
    dst_addr: Ipv4Addr,
) -> anyhow::Result<()> {
    let header = buf
        .get_mut(..IPV4_HDR_LEN)
        .context("buffer too small for ipv4 header")?;
    let mut ipv4 = MutableIpv4Packet::new(header).context("creating ipv4 packet")?;
    ipv4.set_version(4);
    ipv4.set_header_length(5); // 5 x 32 bits = 20 bytes, no options
    ipv4.set_dscp(0);
    ipv4.set_ecn(0);
    ipv4.set_total_length((IPV4_HDR_LEN + payload_len) as u16);
    ipv4.set_identification(rand::random());
    ipv4.set_flags(2); // Do not fragment (010)
    ipv4.set_fragment_offset(0);
    ipv4.set_ttl(64);
    ipv4.set_next_level_protocol(next_protocol);
    ipv4.set_source(src_addr);
    ipv4.set_destination(dst_addr);

    ipv4.set_checksum(0);
    let csum = checksum(&ipv4.to_immutable());
    ipv4.set_checksum(csum);
    Ok(())
}

/// Capture filter predicate: does this frame carry IPv4 traffic sourced
/// from `src`? Applied before any deeper decoding.
pub fn is_from(frame: &[u8], src: Ipv4Addr) -> bool {
    let Ok(eth) = ethernet::parse(frame) else {
        return false;
    };
    if eth.get_ethertype() != EtherTypes::Ipv4 {
        return false;
    }
    match Ipv4Packet::new(eth.payload()) {
        Some(ipv4) => ipv4.get_source() == src,
        None => false,
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
