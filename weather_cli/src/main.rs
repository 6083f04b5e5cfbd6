//! Entry point for the `weather` binary.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use weather_cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Forecast(cmd) => cmd.run(),
        Commands::Countries(cmd) => cmd.run(),
        Commands::Train(cmd) => cmd.run(),
        Commands::Evaluate(cmd) => cmd.run(),
    }
}
