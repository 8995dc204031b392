use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

use crate::errors::MarketDataError;
use crate::models::{clean_rows, DailyClose};
use crate::provider::PriceHistoryProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Alpha Vantage daily time series. Used for exchange-suffixed symbols the
/// other vendors do not carry (e.g. Toronto listings). The free tier is
/// heavily rate limited and reports limit hits inside a 200 response, so
/// the informational payloads are treated as provider errors.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String) -> Self {
        AlphaVantageProvider {
            client: Client::new(),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AlphaVantageDay {
    #[serde(rename = "4. close")]
    close: String,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesDailyResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, AlphaVantageDay>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

fn response_to_closes(
    symbol: &str,
    response: TimeSeriesDailyResponse,
    start: NaiveDate,
) -> Result<Vec<DailyClose>, MarketDataError> {
    if let Some(message) = response.error_message {
        return Err(MarketDataError::SymbolNotFound(format!(
            "{}: {}",
            symbol, message
        )));
    }
    if let Some(note) = response.note.or(response.information) {
        return Err(MarketDataError::ProviderError(format!(
            "Alpha Vantage: {}",
            note
        )));
    }
    let series = response
        .time_series
        .ok_or_else(|| MarketDataError::NoData(symbol.to_string()))?;

    let closes = clean_rows(
        series
            .into_iter()
            .filter_map(|(date, day)| day.close.parse::<f64>().ok().map(|close| (date, close)))
            .collect(),
    );
    let closes: Vec<DailyClose> = closes.into_iter().filter(|row| row.date >= start).collect();
    if closes.is_empty() {
        return Err(MarketDataError::NoData(symbol.to_string()));
    }
    Ok(closes)
}

#[async_trait]
impl PriceHistoryProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        "ALPHA_VANTAGE"
    }

    async fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
    ) -> Result<Vec<DailyClose>, MarketDataError> {
        let url = reqwest::Url::parse_with_params(
            BASE_URL,
            &[
                ("function", "TIME_SERIES_DAILY"),
                ("outputsize", "compact"),
                ("symbol", symbol),
                ("apikey", &self.api_key),
            ],
        )
        .map_err(|e| MarketDataError::ProviderError(format!("Failed to build URL: {}", e)))?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::ProviderError(format!(
                "Alpha Vantage HTTP {}: {}",
                status,
                body.chars().take(140).collect::<String>()
            )));
        }

        let parsed: TimeSeriesDailyResponse = response.json().await.map_err(|e| {
            MarketDataError::ProviderError(format!("Alpha Vantage parse error: {}", e))
        })?;

        response_to_closes(symbol, parsed, start)
    }
}
