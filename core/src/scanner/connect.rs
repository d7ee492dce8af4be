//! Full-connection port probing with bounded concurrency.
//!
//! Portable and unprivileged: every port gets a real TCP handshake attempt
//! and therefore exactly one result, open or closed. The admission gate is a
//! counting semaphore acquired before each probe task starts and released
//! when it finishes.

use std::future::Future;
use std::io;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::Semaphore;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinSet;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use sweepr_common::network::ports::PortRange;
use sweepr_common::network::report::ScanResult;

pub struct ConnectScanner {
    target: Ipv4Addr,
    timeout: Duration,
    concurrency: usize,
}

impl ConnectScanner {
    pub fn new(target: Ipv4Addr, timeout: Duration, concurrency: usize) -> Self {
        Self {
            target,
            timeout,
            concurrency: concurrency.max(1),
        }
    }

    /// Starts the sweep and returns the live result stream.
    ///
    /// Dispatch walks the range ascending, but stream order is completion
    /// order. Cancellation is checked only at admission: probes already in
    /// flight run to their own completion or timeout, and the stream closes
    /// only after the last of them has reported.
    pub fn scan(
        self,
        ports: PortRange,
        cancel: CancellationToken,
    ) -> UnboundedReceiver<ScanResult> {
        self.scan_with(ports, cancel, probe)
    }

    /// Same dispatch machinery with the per-port probe injected, so the
    /// admission and completion behavior can be exercised without sockets.
    fn scan_with<F, Fut>(
        self,
        ports: PortRange,
        cancel: CancellationToken,
        prober: F,
    ) -> UnboundedReceiver<ScanResult>
    where
        F: Fn(Ipv4Addr, u16, Duration) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = ScanResult> + Send + 'static,
    {
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let gate = Arc::new(Semaphore::new(self.concurrency));
            let mut in_flight = JoinSet::new();

            for port in ports.iter() {
                let permit = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    permit = gate.clone().acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(_) => break,
                    },
                };

                let tx = results_tx.clone();
                let prober = prober.clone();
                let (target, limit) = (self.target, self.timeout);
                in_flight.spawn(async move {
                    let _permit = permit;
                    let _ = tx.send(prober(target, port, limit).await);
                });
            }

            // Completion barrier: the caller must never observe a closed
            // stream while a probe is still outstanding.
            while in_flight.join_next().await.is_some() {}
        });

        results_rx
    }
}

async fn probe(target: Ipv4Addr, port: u16, limit: Duration) -> ScanResult {
    let addr = SocketAddrV4::new(target, port);
    match timeout(limit, TcpStream::connect(addr)).await {
        // Established; close immediately without exchanging data.
        Ok(Ok(stream)) => {
            drop(stream);
            ScanResult::open(port)
        }
        Ok(Err(cause)) => ScanResult::closed(port, cause),
        Err(_elapsed) => ScanResult::closed(
            port,
            io::Error::new(io::ErrorKind::TimedOut, "connection attempt timed out"),
        ),
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
