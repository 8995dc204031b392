use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{clean_rows, DailyClose};
use crate::provider::PriceHistoryProvider;

const BASE_URL: &str = "https://api.tiingo.com";

/// Tiingo end-of-day prices. The default vendor; serves split- and
/// dividend-adjusted closes.
pub struct TiingoProvider {
    client: Client,
    token: String,
}

impl TiingoProvider {
    pub fn new(token: String) -> Self {
        TiingoProvider {
            client: Client::new(),
            token,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TiingoPriceRow {
    date: String,
    #[serde(rename = "adjClose")]
    adj_close: Option<f64>,
}

fn rows_to_closes(rows: Vec<TiingoPriceRow>) -> Vec<DailyClose> {
    clean_rows(
        rows.into_iter()
            .filter_map(|row| row.adj_close.map(|close| (row.date, close)))
            .collect(),
    )
}

#[async_trait]
impl PriceHistoryProvider for TiingoProvider {
    fn id(&self) -> &'static str {
        "TIINGO"
    }

    async fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
    ) -> Result<Vec<DailyClose>, MarketDataError> {
        let url = format!(
            "{}/tiingo/daily/{}/prices",
            BASE_URL,
            urlencoding::encode(symbol)
        );
        let start_date = start.format("%Y-%m-%d").to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("startDate", start_date.as_str()), ("token", &self.token)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            return Err(MarketDataError::ProviderError(format!(
                "Tiingo HTTP {}: {}",
                status,
                body.chars().take(140).collect::<String>()
            )));
        }

        let rows: Vec<TiingoPriceRow> = response
            .json()
            .await
            .map_err(|e| MarketDataError::ProviderError(format!("Tiingo parse error: {}", e)))?;

        let closes = rows_to_closes(rows);
        if closes.is_empty() {
            return Err(MarketDataError::NoData(symbol.to_string()));
        }
        Ok(closes)
    }
}
