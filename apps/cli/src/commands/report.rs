use anyhow::{Context, Result};
use std::path::Path;

use folioscout_core::constants::RETURN_DISPLAY_EPSILON;
use folioscout_core::ledger::tickers_from_trades;
use folioscout_core::pricing::PriceResolver;
use folioscout_core::snapshot::{build_snapshot_series, DailySnapshot, SeriesMetric};
use folioscout_storage_json::DataStore;

pub fn run(data_dir: &Path, metric: Option<&str>) -> Result<()> {
    let store = DataStore::new(data_dir);
    let net_worth = store
        .load_net_worth()
        .context("loading net-worth series")?;
    let contributions = store
        .load_contributions()
        .context("loading contribution series")?;
    let trades = store.load_trades().context("loading trade ledger")?;

    let tickers = tickers_from_trades(&trades);
    let resolver = PriceResolver::from_histories(store.load_price_histories(&tickers));

    let series = build_snapshot_series(&net_worth, &contributions, trades, &resolver)?;

    if let Some(name) = metric {
        let metric = SeriesMetric::parse(name);
        for snapshot in &series {
            println!("{} {:.2}", snapshot.date, metric.value_at(snapshot));
        }
        return Ok(());
    }

    let latest = match series.last() {
        Some(snapshot) => snapshot,
        None => return Ok(()),
    };
    print_summary(latest);
    Ok(())
}

fn print_summary(latest: &DailySnapshot) {
    println!("As of {}", latest.date);
    println!("Net worth:     ${:.2}", latest.net_worth);
    println!("Contributions: ${:.2}", latest.contribution);
    println!("Net gain:      {:+.2}", latest.net_gain);
    println!("TWRR:          {:+.2}%", latest.twrr);

    let holdings: Vec<String> = latest
        .tickers_by_weight()
        .into_iter()
        .filter(|ticker| is_displayable(latest, ticker))
        .collect();
    if holdings.is_empty() {
        return;
    }

    println!();
    println!("Holdings:");
    for ticker in holdings {
        let value = latest
            .holdings_value_by_ticker
            .get(&ticker)
            .copied()
            .unwrap_or(0.0);
        let weight = latest
            .holdings_weight_by_ticker
            .get(&ticker)
            .copied()
            .unwrap_or(0.0);
        let total_return = latest
            .return_percent_by_ticker
            .get(&ticker)
            .copied()
            .flatten()
            .unwrap_or(0.0);
        println!(
            "  {:<6} ${:>12.2}  weight {:>6.2}%  return {:+.2}%",
            ticker, value, weight, total_return
        );
    }
}

/// A holding earns a line only when its total return is defined and not
/// essentially zero; fully exited dust positions stay out of the report.
fn is_displayable(snapshot: &DailySnapshot, ticker: &str) -> bool {
    match snapshot.return_percent_by_ticker.get(ticker) {
        Some(Some(percent)) => percent.abs() >= RETURN_DISPLAY_EPSILON,
        _ => false,
    }
}
