//! Interface lookup and the next-hop addressing policy.
//!
//! Raw SYN frames need a concrete outgoing interface and a link-layer
//! next-hop. Everything here is pure selection logic over `pnet`'s
//! interface list; no packets are sent.

use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use tracing::warn;

use crate::error::ScanError;

pub trait NetworkInterfaceExtension {
    fn get_ipv4_net(&self) -> Option<Ipv4Network>;
    fn get_ipv4_addr(&self) -> Option<Ipv4Addr>;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn get_ipv4_net(&self) -> Option<Ipv4Network> {
        self.ips.iter().find_map(|net| match net {
            IpNetwork::V4(v4) if !v4.ip().is_loopback() => Some(*v4),
            _ => None,
        })
    }

    fn get_ipv4_addr(&self) -> Option<Ipv4Addr> {
        self.get_ipv4_net().map(|net| net.ip())
    }
}

/// Finds an interface by its exact name.
pub fn find_by_name(name: &str) -> Result<NetworkInterface, ScanError> {
    datalink::interfaces()
        .into_iter()
        .find(|intf| intf.name == name)
        .ok_or_else(|| ScanError::InterfaceNotFound(name.to_string()))
}

/// Picks the first interface usable for raw scanning when none was named.
pub fn auto_select() -> Option<NetworkInterface> {
    select_from(&datalink::interfaces())
}

fn select_from(interfaces: &[NetworkInterface]) -> Option<NetworkInterface> {
    interfaces
        .iter()
        .find(|intf| {
            intf.is_up()
                && !intf.is_loopback()
                && intf.mac.is_some()
                && intf.get_ipv4_addr().is_some()
        })
        .cloned()
}

/// Decides which IP the ARP resolver should query for a given target.
///
/// On-link targets are resolved directly. Off-link targets go through the
/// explicit gateway, or through a guessed one (the subnet's network address
/// with its lowest octet set to 1) when none was supplied. The guess is a
/// heuristic; when it later fails to resolve, the operator must pass a
/// gateway explicitly.
pub fn next_hop_ip(
    intf: &NetworkInterface,
    target: Ipv4Addr,
    gateway: Option<Ipv4Addr>,
) -> Result<Ipv4Addr, ScanError> {
    let net = intf
        .get_ipv4_net()
        .ok_or_else(|| ScanError::InterfaceUnusable(intf.name.clone()))?;

    if net.contains(target) {
        return Ok(target);
    }

    if let Some(gw) = gateway {
        return Ok(gw);
    }

    let mut octets = net.network().octets();
    octets[3] = 1;
    let guessed = Ipv4Addr::from(octets);
    warn!("target is off-link and no gateway was given, guessing {guessed}");
    Ok(guessed)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
