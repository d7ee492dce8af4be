//! Shared helpers for the end-to-end scan scenarios.

use sweepr_common::network::report::ScanResult;
use tokio::sync::mpsc::UnboundedReceiver;

/// Drains a result stream to completion.
pub async fn collect(mut stream: UnboundedReceiver<ScanResult>) -> Vec<ScanResult> {
    let mut results = Vec::new();
    while let Some(result) = stream.recv().await {
        results.push(result);
    }
    results
}
