//! Single-shot ARP request/reply framing for next-hop resolution.

use std::net::Ipv4Addr;

use anyhow::Context;
use pnet::datalink::MacAddr;
use pnet::packet::Packet;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::EtherTypes;

use crate::{ARP_LEN, ETH_HDR_LEN, MIN_ETH_FRAME_NO_FCS, ethernet};

/// Builds a broadcast who-has request for `query_ip`.
pub fn request(
    src_mac: MacAddr,
    src_ip: Ipv4Addr,
    query_ip: Ipv4Addr,
) -> anyhow::Result<Vec<u8>> {
    let mut buffer = [0u8; MIN_ETH_FRAME_NO_FCS];
    ethernet::make_header(&mut buffer, src_mac, MacAddr::broadcast(), EtherTypes::Arp)?;

    let mut arp = MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN])
        .context("failed to create mutable ARP packet")?;
    arp.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp.set_protocol_type(EtherTypes::Ipv4);
    arp.set_hw_addr_len(6);
    arp.set_proto_addr_len(4);
    arp.set_operation(ArpOperations::Request);
    arp.set_sender_hw_addr(src_mac);
    arp.set_sender_proto_addr(src_ip);
    arp.set_target_hw_addr(MacAddr::zero());
    arp.set_target_proto_addr(query_ip);

    Ok(Vec::from(buffer))
}

/// Decodes `frame` and returns the sender MAC iff it is an ARP reply
/// claiming `query_ip`. Anything else decodes to `None`.
pub fn reply_mac(frame: &[u8], query_ip: Ipv4Addr) -> Option<MacAddr> {
    let eth = ethernet::parse(frame).ok()?;
    if eth.get_ethertype() != EtherTypes::Arp {
        return None;
    }

    let arp = ArpPacket::new(eth.payload())?;
    if arp.get_operation() == ArpOperations::Reply && arp.get_sender_proto_addr() == query_ip {
        return Some(arp.get_sender_hw_addr());
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

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::packet::ethernet::{EthernetPacket, MutableEthernetPacket};

    fn build_reply(sender_mac: MacAddr, sender_ip: Ipv4Addr) -> Vec<u8> {
        let mut buffer = vec![0u8; MIN_ETH_FRAME_NO_FCS];
        {
            let mut eth = MutableEthernetPacket::new(&mut buffer).unwrap();
            eth.set_destination(MacAddr::new(0x02, 0x00, 0x00, 0x00, 0x00, 0x01));
            eth.set_source(sender_mac);
            eth.set_ethertype(EtherTypes::Arp);
        }
        {
            let mut arp =
                MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN]).unwrap();
            arp.set_hardware_type(ArpHardwareTypes::Ethernet);
            arp.set_protocol_type(EtherTypes::Ipv4);
            arp.set_hw_addr_len(6);
            arp.set_proto_addr_len(4);
            arp.set_operation(ArpOperations::Reply);
            arp.set_sender_hw_addr(sender_mac);
            arp.set_sender_proto_addr(sender_ip);
            arp.set_target_hw_addr(MacAddr::new(0x02, 0x00, 0x00, 0x00, 0x00, 0x01));
            arp.set_target_proto_addr(Ipv4Addr::new(10, 0, 0, 9));
        }
        buffer
    }

    #[test]
    fn request_frame_is_broadcast_who_has() {
        let src_mac = MacAddr::new(0x02, 0xde, 0xad, 0xbe, 0xef, 0x01);
        let src_ip = Ipv4Addr::new(10, 0, 0, 9);
        let query_ip = Ipv4Addr::new(10, 0, 0, 1);

        let buffer = request(src_mac, src_ip, query_ip).expect("building ARP request");

        let eth = EthernetPacket::new(&buffer).unwrap();
        assert_eq!(eth.get_destination(), MacAddr::broadcast());
        assert_eq!(eth.get_source(), src_mac);
        assert_eq!(eth.get_ethertype(), EtherTypes::Arp);

        let arp = ArpPacket::new(eth.payload()).unwrap();
        assert_eq!(arp.get_operation(), ArpOperations::Request);
        assert_eq!(arp.get_hardware_type(), ArpHardwareTypes::Ethernet);
        assert_eq!(arp.get_hw_addr_len(), 6);
        assert_eq!(arp.get_proto_addr_len(), 4);
        assert_eq!(arp.get_sender_hw_addr(), src_mac);
        assert_eq!(arp.get_sender_proto_addr(), src_ip);
        assert_eq!(arp.get_target_hw_addr(), MacAddr::zero());
        assert_eq!(arp.get_target_proto_addr(), query_ip);
    }

    #[test]
    fn reply_from_queried_ip_yields_its_mac() {
        let mac = MacAddr::new(0xa8, 0x5e, 0x45, 0x01, 0x02, 0x03);
        let queried = Ipv4Addr::new(10, 0, 0, 1);
        let frame = build_reply(mac, queried);

        assert_eq!(reply_mac(&frame, queried), Some(mac));
    }

    #[test]
    fn reply_from_other_ip_is_ignored() {
        let mac = MacAddr::new(0xa8, 0x5e, 0x45, 0x01, 0x02, 0x03);
        let frame = build_reply(mac, Ipv4Addr::new(10, 0, 0, 2));

        assert_eq!(reply_mac(&frame, Ipv4Addr::new(10, 0, 0, 1)), None);
    }

    #[test]
    fn truncated_frame_is_ignored() {
        let frame = build_reply(MacAddr::zero(), Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(reply_mac(&frame[..ETH_HDR_LEN + 4], Ipv4Addr::new(10, 0, 0, 1)), None);
    }

    #[test]
    fn non_arp_frame_is_ignored() {
        let mut frame = build_reply(MacAddr::zero(), Ipv4Addr::new(10, 0, 0, 1));
        {
            let mut eth = MutableEthernetPacket::new(&mut frame).unwrap();
            eth.set_ethertype(EtherTypes::Ipv4);
        }
        assert_eq!(reply_mac(&frame, Ipv4Addr::new(10, 0, 0, 1)), None);
    }
}
