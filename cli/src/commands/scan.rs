use std::time::{Duration, Instant};

use colored::*;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use sweepr_common::config::ScanConfig;
use sweepr_common::error::ScanError;
use sweepr_common::network::interface::{self, NetworkInterfaceExtension};
use sweepr_common::network::report::{ScanMode, ScanResult};
use sweepr_common::network::target::ScanTarget;
use sweepr_core::scanner::{ConnectScanner, ResolvedLink, ScanStrategy, SynScanner, resolver};

use crate::commands::CommandLine;
use crate::terminal::print;

pub async fn run(args: CommandLine, cancel: CancellationToken) -> anyhow::Result<()> {
    let cfg = ScanConfig {
        target: ScanTarget::new(args.target, args.ports),
        mode: args.mode,
        concurrency: args.concurrency,
        timeout: Duration::from_millis(args.timeout),
        rate: args.rate,
        interface: args.interface,
        gateway: args.gateway,
    };

    print::banner(&cfg);

    let strategy = build_strategy(&cfg, &cancel).await?;

    let start = Instant::now();
    let stream = strategy.start(cfg.target.ports, cancel);
    let open_ports = consume(stream, &cfg).await;

    print::summary(&open_ports, start.elapsed());
    Ok(())
}

async fn build_strategy(
    cfg: &ScanConfig,
    cancel: &CancellationToken,
) -> anyhow::Result<ScanStrategy> {
    match cfg.mode {
        ScanMode::Connect => Ok(ScanStrategy::Connect(ConnectScanner::new(
            cfg.target.addr,
            cfg.timeout,
            cfg.concurrency,
        ))),
        ScanMode::Syn => {
            if !is_root::is_root() {
                return Err(ScanError::PrivilegeRequired.into());
            }

            let intf = match &cfg.interface {
                Some(name) => interface::find_by_name(name)?,
                None => {
                    let intf = interface::auto_select()
                        .ok_or_else(|| ScanError::InterfaceUnusable("<auto>".into()))?;
                    warn!("no interface given, auto-selected {}", intf.name);
                    intf
                }
            };
            info!(
                "scanning via {} ({})",
                intf.name,
                intf.get_ipv4_addr()
                    .map(|ip| ip.to_string())
                    .unwrap_or_else(|| "no IPv4".into())
            );

            let hop_ip = interface::next_hop_ip(&intf, cfg.target.addr, cfg.gateway)?;
            info!("resolving hardware address of next hop {hop_ip}");

            let resolve_intf = intf.clone();
            let resolve_cancel = cancel.clone();
            let next_hop_mac = tokio::task::spawn_blocking(move || {
                resolver::resolve_mac(&resolve_intf, hop_ip, &resolve_cancel)
            })
            .await?
            .map_err(|e| {
                // A guessed gateway that never answers means the operator
                // has to supply one; an on-link timeout stays what it is.
                let guessed = cfg.gateway.is_none() && hop_ip != cfg.target.addr;
                if guessed
                    && matches!(
                        e.downcast_ref::<ScanError>(),
                        Some(ScanError::ResolutionTimeout(_))
                    )
                {
                    anyhow::Error::new(ScanError::GatewayRequired)
                } else {
                    e.context("resolving the next hop's hardware address")
                }
            })?;
            info!("next hop is {next_hop_mac}");

            let link = ResolvedLink::new(intf, next_hop_mac)?;
            let scanner = SynScanner::open(link, cfg.target.addr, cfg.rate)?;
            Ok(ScanStrategy::Syn(scanner))
        }
    }
}

/// Drains the result stream live, printing open ports as they arrive.
async fn consume(mut stream: UnboundedReceiver<ScanResult>, cfg: &ScanConfig) -> Vec<u16> {
    let bar = print::progress(cfg);
    let mut open_ports: Vec<u16> = Vec::new();

    while let Some(result) = stream.recv().await {
        // SYN mode only ever reports opens, so the bar would never fill;
        // it runs as a plain spinner there.
        if cfg.mode == ScanMode::Connect {
            bar.inc(1);
        }
        if result.open {
            bar.suspend(|| {
                println!("{} {}", "[+]".green().bold(), format!("open: {}", result.port).green());
            });
            open_ports.push(result.port);
        }
    }

    bar.finish_and_clear();
    open_ports.sort_unstable();
    open_ports
}
