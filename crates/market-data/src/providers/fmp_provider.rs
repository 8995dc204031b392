use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{clean_rows, DailyClose};
use crate::provider::PriceHistoryProvider;

const BASE_URL: &str = "https://financialmodelingprep.com/stable/historical-price-eod/full";

/// Financial Modeling Prep end-of-day prices. Alternative to Tiingo; the
/// endpoint returns full history, so rows before the requested start are
/// filtered client-side.
pub struct FmpProvider {
    client: Client,
    api_key: String,
}

impl FmpProvider {
    pub fn new(api_key: String) -> Self {
        FmpProvider {
            client: Client::new(),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FmpPriceRow {
    date: String,
    #[serde(rename = "adjClose")]
    adj_close: Option<f64>,
    close: Option<f64>,
    price: Option<f64>,
}

impl FmpPriceRow {
    fn best_close(&self) -> Option<f64> {
        self.adj_close.or(self.close).or(self.price)
    }
}

/// The endpoint has returned both a bare array and an object with a
/// `historical` field depending on plan and symbol type.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FmpResponse {
    Rows(Vec<FmpPriceRow>),
    Wrapped { historical: Vec<FmpPriceRow> },
}

impl FmpResponse {
    fn into_rows(self) -> Vec<FmpPriceRow> {
        match self {
            FmpResponse::Rows(rows) => rows,
            FmpResponse::Wrapped { historical } => historical,
        }
    }
}

fn rows_to_closes(rows: Vec<FmpPriceRow>, start: NaiveDate) -> Vec<DailyClose> {
    let closes = clean_rows(
        rows.into_iter()
            .filter_map(|row| row.best_close().map(|close| (row.date, close)))
            .collect(),
    );
    closes.into_iter().filter(|row| row.date >= start).collect()
}

#[async_trait]
impl PriceHistoryProvider for FmpProvider {
    fn id(&self) -> &'static str {
        "FMP"
    }

    async fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
    ) -> Result<Vec<DailyClose>, MarketDataError> {
        let response = self
            .client
            .get(BASE_URL)
            .query(&[("symbol", symbol), ("apikey", &self.api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::ProviderError(format!(
                "FMP HTTP {}: {}",
                status,
                body.chars().take(140).collect::<String>()
            )));
        }

        let parsed: FmpResponse = response
            .json()
            .await
            .map_err(|e| MarketDataError::ProviderError(format!("FMP parse error: {}", e)))?;

        let closes = rows_to_closes(parsed.into_rows(), start);
        if closes.is_empty() {
            return Err(MarketDataError::NoData(symbol.to_string()));
        }
        Ok(closes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn parses_bare_array_payload() {
        let payload = r#"[
            {"date":"2024-01-03","adjClose":185.64},
            {"date":"2024-01-02","close":184.29}
        ]"#;
        let parsed: FmpResponse = serde_json::from_str(payload).unwrap();
        let closes = rows_to_closes(parsed.into_rows(), date("2024-01-01"));
        assert_eq!(closes.len(), 2);
        assert_eq!(closes[0].close, 184.29);
    }

    #[test]
    fn parses_wrapped_payload_and_filters_by_start() {
        let payload = r#"{"historical":[
            {"date":"2024-01-03","adjClose":185.64},
            {"date":"2023-12-29","adjClose":180.0}
        ]}"#;
        let parsed: FmpResponse = serde_json::from_str(payload).unwrap();
        let closes = rows_to_closes(parsed.into_rows(), date("2024-01-01"));
        assert_eq!(closes.len(), 1);
        assert_eq!(closes[0].date, date("2024-01-03"));
    }

    #[test]
    fn adjusted_close_wins_over_other_fields() {
        let row = FmpPriceRow {
            date: "2024-01-02".to_string(),
            adj_close: Some(1.0),
            close: Some(2.0),
            price: Some(3.0),
        };
        assert_eq!(row.best_close(), Some(1.0));

        let row = FmpPriceRow {
            date: "2024-01-02".to_string(),
            adj_close: None,
            close: None,
            price: Some(3.0),
        };
        assert_eq!(row.best_close(), Some(3.0));
    }
}
