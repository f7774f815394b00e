use sse_decode::cli::{parse_args, run_cli_command};

use color_eyre::Result;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout carries only decoded events.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try 'sse-decode --help' for more information.");
            std::process::exit(2);
        }
    };

    let runtime = tokio::runtime::Runtime::new()?;

    let result = runtime.block_on(async {
        let cancel = CancellationToken::new();

        // Ctrl-C releases the stream instead of killing the process mid-write
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupted, closing stream");
                on_interrupt.cancel();
            }
        });

        run_cli_command(command, cancel).await
    });

    // A blocking stdin read may still be parked; don't wait for it
    runtime.shutdown_background();
    result
}
