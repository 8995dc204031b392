use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

use folioscout_core::ledger::{tickers_from_trades, DatedValue};
use folioscout_core::pricing::PriceResolver;
use folioscout_core::snapshot::{extend_snapshot_series, ExtendOutcome, SeriesPoint};
use folioscout_core::utils::today_new_york;
use folioscout_storage_json::DataStore;

pub fn run(data_dir: &Path, through: Option<NaiveDate>) -> Result<()> {
    let store = DataStore::new(data_dir);
    let mut net_worth = store
        .load_net_worth()
        .context("loading net-worth series")?;
    let mut contributions = store
        .load_contributions()
        .context("loading contribution series")?;
    let trades = store.load_trades().context("loading trade ledger")?;
    let increments = store
        .load_contribution_increments()
        .context("loading contribution increments")?;

    let last_mark = *net_worth
        .last()
        .context("net-worth series is empty; nothing to extend")?;
    let last_contribution = contributions.last().map(|row| row.value).unwrap_or(0.0);
    let anchor = SeriesPoint::new(last_mark.date, last_mark.value, last_contribution);

    let through = through.unwrap_or_else(today_new_york);
    info!("Extending from {} through {}", anchor.date, through);

    let tickers = tickers_from_trades(&trades);
    let resolver = PriceResolver::from_histories(store.load_price_histories(&tickers));

    match extend_snapshot_series(anchor, trades, &increments, &resolver, through) {
        ExtendOutcome::UpToDate => {
            println!("Already up to date (last: {})", anchor.date);
        }
        ExtendOutcome::Appended(rows) => {
            for row in &rows {
                net_worth.push(DatedValue::new(row.date, row.net_worth));
                contributions.push(DatedValue::new(row.date, row.contribution));
            }
            store.save_net_worth(&net_worth)?;
            store.save_contributions(&contributions)?;

            println!("Added {} days", rows.len());
            if let Some(last) = rows.last() {
                println!("Latest: {} = ${:.2}", last.date, last.net_worth);
            }
        }
    }
    Ok(())
}
