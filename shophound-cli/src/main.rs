//! Shophound CLI - Command-line interface
//!
//! Provides command-line access to the search aggregator: a long-running
//! API server and a one-shot search for scripting and debugging.

mod commands;

use clap::Parser;
use shophound_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "shophound")]
#[command(about = "A multi-retailer product search aggregator")]
struct Cli {
    /// Console log level (full debug logs always go to logs/)
    #[arg(long, value_enum, default_value = "info")]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), None)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    commands::handle_command(cli.command).await
}
