//! CLI module for sse-decode.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - Decoding a stream from stdin or a URL
//!
//! # Usage
//!
//! ```ignore
//! use sse_decode::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! run_cli_command(command, CancellationToken::new()).await?;
//! ```

pub mod args;
pub mod decode;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, DecodeArgs, Source, USAGE};
pub use decode::{handle_decode_command, write_events};
pub use version::{handle_version_command, VERSION};

use color_eyre::Result;
use tokio_util::sync::CancellationToken;

/// Run a parsed CLI command.
pub async fn run_cli_command(command: CliCommand, cancel: CancellationToken) -> Result<()> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => println!("{}", USAGE),
        CliCommand::Decode(args) => {
            let count = handle_decode_command(args, cancel).await?;
            tracing::info!("Decoded {} events", count);
        }
    }
    Ok(())
}
