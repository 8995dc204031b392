use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use folioscout_core::ledger::tickers_from_trades;
use folioscout_core::pricing::PricePoint;
use folioscout_core::utils::today_new_york;
use folioscout_market_data::providers::{AlphaVantageProvider, FmpProvider, TiingoProvider};
use folioscout_market_data::{
    PriceHistoryProvider, ProviderRegistry, DEFAULT_HISTORY_START, REFRESH_OVERLAP_DAYS,
};
use folioscout_storage_json::{DataStore, PriceUpdateMeta};

use crate::config::{self, PriceSource};

pub async fn run(data_dir: &Path, force: bool, tickers: Option<Vec<String>>) -> Result<()> {
    let store = DataStore::new(data_dir);
    let today = today_new_york().format("%Y-%m-%d").to_string();

    if !force {
        if let Some(meta) = store.load_update_meta() {
            if meta.date_str == today {
                println!(
                    "Already updated for {} - skipping (use --force to run anyway)",
                    today
                );
                return Ok(());
            }
        }
    }

    let trades = store.load_trades().context("loading trade ledger")?;
    let mut universe = tickers_from_trades(&trades);
    if let Some(subset) = tickers {
        let subset: HashSet<String> = subset
            .into_iter()
            .map(|t| t.trim().to_ascii_uppercase())
            .collect();
        universe.retain(|ticker| subset.contains(ticker));
    }
    if universe.is_empty() {
        println!("No tickers found to update.");
        return Ok(());
    }

    let registry = build_registry()?;
    info!("Updating {} tickers...", universe.len());

    let mut updated = 0;
    for ticker in &universe {
        let route = match registry.route(ticker) {
            Ok(route) => route,
            Err(e) => {
                warn!("{}: {} (skipping, keeping existing file)", ticker, e);
                continue;
            }
        };

        match update_one(&store, ticker, &route.symbol, route.provider.as_ref()).await {
            Ok(rows) => {
                updated += 1;
                info!("{}: updated ({} rows)", ticker, rows);
            }
            Err(e) => warn!("{}: {} (skipping, keeping existing file)", ticker, e),
        }

        tokio::time::sleep(route.pacing).await;
    }

    store.save_update_meta(&PriceUpdateMeta {
        date_str: today,
        updated_tickers: updated,
        attempted_tickers: universe.len(),
    })?;

    println!("Done. Updated {}/{} tickers.", updated, universe.len());
    Ok(())
}

async fn update_one(
    store: &DataStore,
    ticker: &str,
    symbol: &str,
    provider: &dyn PriceHistoryProvider,
) -> Result<usize> {
    // Re-fetch a window before the last stored row so late vendor
    // revisions of recent closes are healed on merge.
    let start = match store.last_price_date(ticker) {
        Some(last) => last - Duration::days(REFRESH_OVERLAP_DAYS),
        None => DEFAULT_HISTORY_START.parse::<NaiveDate>()?,
    };

    let closes = provider.daily_closes(symbol, start).await?;
    let points: Vec<PricePoint> = closes
        .iter()
        .map(|close| PricePoint::new(close.date, close.close))
        .collect();
    Ok(store.merge_price_history(ticker, &points)?)
}

fn build_registry() -> Result<ProviderRegistry> {
    let default_provider: Arc<dyn PriceHistoryProvider> = match config::PRICE_SOURCE {
        PriceSource::Tiingo => {
            let token = config::tiingo_token()
                .context("Missing TIINGO_TOKEN env var. Run: export TIINGO_TOKEN=your_token")?;
            Arc::new(TiingoProvider::new(token))
        }
        PriceSource::Fmp => {
            let key = config::fmp_api_key()
                .context("Missing FMP_API_KEY env var. Run: export FMP_API_KEY=your_key")?;
            Arc::new(FmpProvider::new(key))
        }
    };

    let mut registry = ProviderRegistry::new(default_provider).with_alpha_vantage_routing(
        config::ALPHA_VANTAGE_TICKERS.iter().map(|s| s.to_string()),
        config::alpha_vantage_symbol_overrides(),
    );
    if let Some(key) = config::alpha_vantage_api_key() {
        registry = registry.with_alpha_vantage_provider(Arc::new(AlphaVantageProvider::new(key)));
    }
    Ok(registry)
}
