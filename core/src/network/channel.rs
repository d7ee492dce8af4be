//! Raw Ethernet channel plumbing.
//!
//! Two access patterns: a blocking sender/receiver pair for the single-shot
//! ARP resolver, and a captured handle whose receive side is drained by a
//! dedicated thread into an async queue for the SYN engine. Both use a short
//! read timeout so their poll loops can observe cancellation.

use std::time::Duration;

use anyhow::{Context, bail};
use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};
use tokio::sync::mpsc;

const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// A live capture on one interface. The send side stays caller-owned; the
/// receive side is a queue fed by the capture thread. The thread exits once
/// this handle's receiver is dropped.
pub struct EthernetHandle {
    pub tx: Box<dyn DataLinkSender>,
    pub rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

/// Opens a blocking Ethernet sender/receiver pair on the interface.
pub fn open_raw(
    intf: &NetworkInterface,
) -> anyhow::Result<(Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>)> {
    open_ethernet_channel(intf, &capture_config(), datalink::channel)
}

/// Opens a capture whose frames pass through `filter` before being queued.
/// The filter runs on the capture thread, keeping the async side limited to
/// relevant traffic only.
pub fn start_capture(
    intf: &NetworkInterface,
    filter: impl Fn(&[u8]) -> bool + Send + 'static,
) -> anyhow::Result<EthernetHandle> {
    let (tx, mut rx) = open_raw(intf)?;
    let (queue_tx, queue_rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        loop {
            match rx.next() {
                Ok(frame) => {
                    if !filter(frame) {
                        continue;
                    }
                    if queue_tx.send(frame.to_vec()).is_err() {
                        break;
                    }
                }
                // Read timeouts give us a chance to notice the handle is gone.
                Err(_) => {
                    if queue_tx.is_closed() {
                        break;
                    }
                }
            }
        }
    });

    Ok(EthernetHandle { tx, rx: queue_rx })
}

fn open_ethernet_channel<F>(
    intf: &NetworkInterface,
    cfg: &Config,
    channel_opener: F,
) -> anyhow::Result<(Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>)>
where
    F: FnOnce(&NetworkInterface, Config) -> std::io::Result<datalink::Channel>,
{
    let ch: Channel =
        channel_opener(intf, *cfg).with_context(|| format!("opening on {}", intf.name))?;
    match ch {
        Channel::Ethernet(tx, rx) => Ok((tx, rx)),
        _ => bail!("non-ethernet channel for {}", intf.name),
    }
}

fn capture_config() -> Config {
    Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
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

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::datalink::dummy;

    #[test]
    fn open_ethernet_channel_should_succeed_on_ethernet_channel() {
        let dummy_intf: NetworkInterface = dummy::dummy_interface(0);
        let cfg = Config::default();
        let mock_opener_success =
            |i: &NetworkInterface, _cfg: Config| -> std::io::Result<datalink::Channel> {
                let dummy_cfg = dummy::Config::default();
                dummy::channel(i, dummy_cfg)
            };
        let result = open_ethernet_channel(&dummy_intf, &cfg, mock_opener_success);
        assert!(result.is_ok());
    }

    #[test]
    fn open_ethernet_channel_should_fail_on_io_error() {
        let dummy_intf: NetworkInterface = dummy::dummy_interface(0);
        let cfg: Config = Config::default();
        let mock_opener_fail =
            |_: &NetworkInterface, _: Config| -> std::io::Result<datalink::Channel> {
                Err(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "Mock I/O Error",
                ))
            };
        let result = open_ethernet_channel(&dummy_intf, &cfg, mock_opener_fail);
        assert!(result.is_err());
        if let Err(err) = result {
            assert!(err.to_string().contains("opening on eth0"));
            let cause: Option<&std::io::Error> = err.downcast_ref::<std::io::Error>();
            assert_eq!(
                cause.expect("cause should be an io::Error").kind(),
                std::io::ErrorKind::PermissionDenied
            );
        }
    }
}
