use anyhow::Context;
use pnet::datalink::MacAddr;
use pnet::packet::ethernet::{EtherType, EthernetPacket, MutableEthernetPacket};

pub fn make_header(
    buffer: &mut [u8],
    src_mac: MacAddr,
    dst_mac: MacAddr,
    et: EtherType,
) -> anyhow::Result<()> {
    let mut eth = MutableEthernetPacket::new(&mut buffer[..])
        .context("failed to create mutable Ethernet packet")?;

    eth.set_source(src_mac);
    eth.set_destination(dst_mac);
    eth.set_ethertype(et);

    Ok(())
}

pub fn parse(frame: &[u8]) -> anyhow::Result<EthernetPacket<'_>> {
    EthernetPacket::new(frame).context(format!(
        "truncated or invalid Ethernet frame (len {})",
        frame.len()
    ))
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
    use crate::ETH_HDR_LEN;
    use pnet::packet::ethernet::EtherTypes;

    #[test]
    fn ethernet_header_sets_fields() {
        let mut buffer = [0u8; crate::MIN_ETH_FRAME_NO_FCS];
        let src = MacAddr::new(0x00, 0x11, 0x22, 0x33, 0x44, 0x55);
        let dst = MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff);

        make_header(&mut buffer, src, dst, EtherTypes::Ipv4).unwrap();

        let eth = EthernetPacket::new(&buffer[..ETH_HDR_LEN]).expect("parse eth");
        assert_eq!(eth.get_source(), src);
        assert_eq!(eth.get_destination(), dst);
        assert_eq!(eth.get_ethertype(), EtherTypes::Ipv4);
    }

    #[test]
    fn ethernet_header_errors_when_buffer_too_small() {
        let mut tiny: [u8; 0] = [];

        let err =
            make_header(&mut tiny, MacAddr::zero(), MacAddr::zero(), EtherTypes::Arp).unwrap_err();

        assert!(
            err.to_string().contains("Ethernet"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn parse_rejects_short_frames() {
        let err = parse(&[0u8; 4]).unwrap_err();
        assert!(err.to_string().contains("len 4"));
    }
}
