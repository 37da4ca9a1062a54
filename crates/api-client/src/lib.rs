use crate::error::ApiError;
use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::ProviderConfig;
use core_types::{PricePoint, PriceSeries, Ticker, TickerMetadata};
use serde::de::DeserializeOwned;

pub mod error;
pub mod fetcher;
pub mod memory;
pub mod responses;
// --- Public API ---
pub use fetcher::{fetch_ticker, FetchResult, InvalidReason};
pub use memory::InMemoryProvider;
pub use responses::{DailySeriesResponse, OverviewResponse, ProviderNotice};

/// The generic, abstract interface for a market data provider.
/// This trait is the contract the dashboard uses, allowing the underlying
/// implementation (live or in-memory) to be swapped out.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// A human-readable name used for data source attribution.
    fn name(&self) -> &'static str;

    /// Fetches the company profile for a symbol.
    async fn fetch_metadata(&self, ticker: &Ticker) -> Result<TickerMetadata, ApiError>;

    /// Fetches every daily close the provider holds for a symbol.
    async fn fetch_daily_closes(&self, ticker: &Ticker) -> Result<PriceSeries, ApiError>;
}

/// A concrete implementation of the `MarketDataProvider` for Alpha Vantage.
#[derive(Clone)]
pub struct AlphaVantageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn _query<T: DeserializeOwned>(
        &self,
        function: &str,
        ticker: &Ticker,
        extra: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/query", self.base_url);
        let mut params = vec![
            ("function", function),
            ("symbol", ticker.as_str()),
            ("apikey", self.api_key.as_str()),
        ];
        params.extend_from_slice(extra);

        tracing::debug!(function, symbol = %ticker, "Querying provider.");
        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        }

        serde_json::from_str::<T>(&text).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageClient {
    fn name(&self) -> &'static str {
        "Alpha Vantage"
    }

    async fn fetch_metadata(&self, ticker: &Ticker) -> Result<TickerMetadata, ApiError> {
        let overview: OverviewResponse = self._query("OVERVIEW", ticker, &[]).await?;

        if let Some(message) = overview.notice.message() {
            return Err(ApiError::Provider(message.to_string()));
        }
        // An unknown symbol comes back as an empty object.
        if overview.symbol.is_none() {
            return Err(ApiError::NotFound(ticker.to_string()));
        }

        Ok(TickerMetadata {
            symbol: overview.symbol,
            name: overview.name,
            sector: overview.sector,
            industry: overview.industry,
            description: overview.description,
        })
    }

    async fn fetch_daily_closes(&self, ticker: &Ticker) -> Result<PriceSeries, ApiError> {
        let response: DailySeriesResponse = self
            ._query("TIME_SERIES_DAILY", ticker, &[("outputsize", "full")])
            .await?;

        if let Some(message) = response.notice.message() {
            return Err(ApiError::Provider(message.to_string()));
        }

        let points = response
            .time_series
            .into_iter()
            .map(|(date, bar)| {
                let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .map_err(|_| ApiError::InvalidData(format!("Invalid trading date: {}", date)))?;
                Ok(PricePoint::new(date, bar.close))
            })
            .collect::<Result<Vec<PricePoint>, ApiError>>()?;

        Ok(PriceSeries::new(points))
    }
}
