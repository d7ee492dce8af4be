mod commands;
mod terminal;

use commands::CommandLine;
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse_args();
    terminal::logging::init(args.verbose);

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping the scan...");
            interrupt.cancel();
        }
    });

    commands::scan::run(args, cancel).await
}
