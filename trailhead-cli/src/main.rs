//! Trailhead CLI - Command-line interface
//!
//! Provides command-line access to the learning-path catalogue and a
//! playback demo driven by the simulated video adapter.

mod catalog_data;
mod commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "trailhead")]
#[command(about = "A learning-path progress tracker")]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    commands::handle_command(cli.command).await?;

    Ok(())
}
