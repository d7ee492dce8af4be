//! Minimal TCP SYN framing and half-open reply decoding.

use std::net::Ipv4Addr;

use anyhow::Context;
use pnet::datalink::MacAddr;
use pnet::packet::Packet;
use pnet::packet::ethernet::EtherTypes;
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::packet::ipv4::Ipv4Packet;
use pnet::packet::tcp::{MutableTcpPacket, TcpFlags, TcpPacket, ipv4_checksum};

use crate::{ETH_HDR_LEN, IPV4_HDR_LEN, TCP_HDR_LEN, ethernet, ipv4};

pub const SYN_FRAME_LEN: usize = ETH_HDR_LEN + IPV4_HDR_LEN + TCP_HDR_LEN;
const SYN_WINDOW: u16 = 1024;

/// Builds a complete Ethernet/IPv4/TCP frame with only the SYN flag set.
/// Lengths and checksums are computed fresh for every frame.
pub fn syn_frame(
    src_mac: MacAddr,
    dst_mac: MacAddr,
    src_ip: Ipv4Addr,
    dst_ip: Ipv4Addr,
    src_port: u16,
    dst_port: u16,
) -> anyhow::Result<Vec<u8>> {
    let mut buffer = [0u8; SYN_FRAME_LEN];
    ethernet::make_header(&mut buffer, src_mac, dst_mac, EtherTypes::Ipv4)?;
    ipv4::make_header(
        &mut buffer[ETH_HDR_LEN..],
        TCP_HDR_LEN,
        IpNextHeaderProtocols::Tcp,
        src_ip,
        dst_ip,
    )?;

    let mut tcp = MutableTcpPacket::new(&mut buffer[ETH_HDR_LEN + IPV4_HDR_LEN..])
        .context("creating tcp packet")?;
    tcp.set_source(src_port);
    tcp.set_destination(dst_port);
    tcp.set_sequence(rand::random());
    tcp.set_acknowledgement(0);
    tcp.set_data_offset(5); // 20 bytes, no options
    tcp.set_flags(TcpFlags::SYN);
    tcp.set_window(SYN_WINDOW);
    tcp.set_urgent_ptr(0);

    let csum = ipv4_checksum(&tcp.to_immutable(), &src_ip, &dst_ip);
    tcp.set_checksum(csum);

    Ok(Vec::from(buffer))
}

/// Decodes a captured frame down to its TCP layer and returns the source
/// port iff both SYN and ACK are set, the canonical open-port reply.
/// RST and everything undecodable map to `None`.
pub fn syn_ack_source(frame: &[u8]) -> Option<u16> {
    let eth = ethernet::parse(frame).ok()?;
    if eth.get_ethertype() != EtherTypes::Ipv4 {
        return None;
    }

    let ip = Ipv4Packet::new(eth.payload())?;
    if ip.get_next_level_protocol() != IpNextHeaderProtocols::Tcp {
        return None;
    }

    let tcp = TcpPacket::new(ip.payload())?;
    let flags = tcp.get_flags();
    let syn_ack = TcpFlags::SYN | TcpFlags::ACK;
    if flags & syn_ack == syn_ack {
        return Some(tcp.get_source());
    }
    None
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
