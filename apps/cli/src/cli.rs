use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folioscout", version, about = "Portfolio snapshot and return tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild the snapshot series and print the latest portfolio state
    Report {
        /// Data directory holding the ledger and price files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Print a series instead of the summary: net-worth, contributions,
        /// or an instrument ticker
        #[arg(long)]
        metric: Option<String>,
    },

    /// Append new days to the persisted net-worth and contribution series
    Extend {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Last day to append, inclusive (defaults to today in New York)
        #[arg(long)]
        through: Option<NaiveDate>,
    },

    /// Refresh per-instrument price history files from the price vendors
    UpdatePrices {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Refresh even if a refresh already ran today
        #[arg(long)]
        force: bool,

        /// Restrict the refresh to these tickers
        #[arg(long, value_delimiter = ',')]
        tickers: Option<Vec<String>>,
    },
}
