mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Report { data_dir, metric } => commands::report::run(&data_dir, metric.as_deref()),
        Commands::Extend { data_dir, through } => commands::extend::run(&data_dir, through),
        Commands::UpdatePrices {
            data_dir,
            force,
            tickers,
        } => commands::update_prices::run(&data_dir, force, tickers).await,
    }
}
