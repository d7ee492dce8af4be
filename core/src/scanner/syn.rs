//! Half-open SYN probing over a raw Ethernet channel.
//!
//! Two long-lived loops share the run: the send loop paces one SYN frame
//! per port, the receive loop decodes captured replies. A coordinator task
//! owns stream closure with a two-phase shutdown: only after the send loop
//! has finished its grace period *and* the receive loop has been stopped
//! and joined does the stream close. Results carry `open == true` only;
//! silence about a port is a non-observation, never a closed verdict.

use std::net::Ipv4Addr;
use std::time::Duration;

use pnet::datalink::DataLinkSender;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use sweepr_common::network::ports::PortRange;
use sweepr_common::network::report::ScanResult;
use sweepr_protocols::{ipv4, tcp};

use crate::network::channel::{self, EthernetHandle};
use crate::scanner::ResolvedLink;
use crate::scanner::pacer::Pacer;

/// How long to keep capturing after the last probe, for in-flight replies.
const REPLY_GRACE: Duration = Duration::from_secs(2);

pub struct SynScanner {
    link: ResolvedLink,
    target: Ipv4Addr,
    rate: u32,
    /// Constant for the whole run; replies are matched only by their own
    /// source port, so ours just needs to be out of the scanned range's way.
    src_port: u16,
    handle: EthernetHandle,
}

impl SynScanner {
    /// Opens the capture (filtered to frames sourced from the target) and
    /// fixes the run's source port. Requires raw link access.
    pub fn open(link: ResolvedLink, target: Ipv4Addr, rate: u32) -> anyhow::Result<Self> {
        let handle =
            channel::start_capture(&link.interface, move |frame| ipv4::is_from(frame, target))?;
        let src_port: u16 = rand::random_range(49152..u16::MAX);

        Ok(Self {
            link,
            target,
            rate,
            src_port,
            handle,
        })
    }

    /// Starts the send and receive loops and hands back the result stream.
    pub fn start(
        self,
        ports: PortRange,
        cancel: CancellationToken,
    ) -> UnboundedReceiver<ScanResult> {
        let (results_tx, results_rx) = unbounded_channel();
        let Self {
            link,
            target,
            rate,
            src_port,
            handle,
        } = self;
        let EthernetHandle {
            tx: eth_tx,
            rx: eth_rx,
        } = handle;

        // Coordinator: single owner of the close decision.
        tokio::spawn(async move {
            let stop = CancellationToken::new();
            let receiver = tokio::spawn(recv_loop(eth_rx, ports, results_tx.clone(), stop.clone()));

            send_loop(eth_tx, &link, target, src_port, ports, rate, &cancel).await;

            if !cancel.is_cancelled() {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = tokio::time::sleep(REPLY_GRACE) => {}
                }
            }

            // Phase two: signal, then join, then let the last sender drop.
            stop.cancel();
            let _ = receiver.await;
        });

        results_rx
    }
}

async fn send_loop(
    mut eth_tx: Box<dyn DataLinkSender>,
    link: &ResolvedLink,
    target: Ipv4Addr,
    src_port: u16,
    ports: PortRange,
    rate: u32,
    cancel: &CancellationToken,
) {
    let mut pacer = Pacer::per_second(rate);

    for port in ports.iter() {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            _ = pacer.tick() => {}
        }

        let frame = match tcp::syn_frame(
            link.src_mac,
            link.next_hop_mac,
            link.src_ip,
            target,
            src_port,
            port,
        ) {
            Ok(frame) => frame,
            Err(e) => {
                debug!("could not frame probe for port {port}: {e}");
                continue;
            }
        };

        // A lost probe is a non-observation, never closed-port evidence.
        match eth_tx.send_to(&frame, None) {
            Some(Ok(())) => {}
            Some(Err(e)) => debug!("probe for port {port} not sent: {e}"),
            None => debug!("probe for port {port} refused by the channel"),
        }
    }
}

async fn recv_loop(
    mut eth_rx: UnboundedReceiver<Vec<u8>>,
    ports: PortRange,
    results: UnboundedSender<ScanResult>,
    stop: CancellationToken,
) {
    loop {
        let frame = tokio::select! {
            biased;
            _ = stop.cancelled() => return,
            frame = eth_rx.recv() => match frame {
                Some(frame) => frame,
                None => return,
            },
        };

        // Correlation is stateless: the reply's source port is the probed
        // port. Undecodable frames and RSTs fall through silently.
        if let Some(port) = tcp::syn_ack_source(&frame)
            && ports.contains(port)
        {
            let _ = results.send(ScanResult::open(port));
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
