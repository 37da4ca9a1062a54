use crate::error::ApiError;
use crate::MarketDataProvider;
use async_trait::async_trait;
use core_types::{PriceSeries, Ticker, TickerMetadata};
use std::collections::HashMap;

/// A `MarketDataProvider` serving fixed data from memory.
///
/// Symbols that were never registered behave like unknown symbols at the
/// live provider. A provider built with [`InMemoryProvider::failing`] fails
/// every request, standing in for a network outage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    tickers: HashMap<String, (TickerMetadata, PriceSeries)>,
    failure: Option<String>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            tickers: HashMap::new(),
            failure: Some(message.into()),
        }
    }

    pub fn with_ticker(
        mut self,
        symbol: &str,
        metadata: TickerMetadata,
        series: PriceSeries,
    ) -> Self {
        self.tickers
            .insert(symbol.to_uppercase(), (metadata, series));
        self
    }

    fn lookup(&self, ticker: &Ticker) -> Result<&(TickerMetadata, PriceSeries), ApiError> {
        if let Some(message) = &self.failure {
            return Err(ApiError::Provider(message.clone()));
        }
        self.tickers
            .get(ticker.as_str())
            .ok_or_else(|| ApiError::NotFound(ticker.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryProvider {
    fn name(&self) -> &'static str {
        "in-memory data"
    }

    async fn fetch_metadata(&self, ticker: &Ticker) -> Result<TickerMetadata, ApiError> {
        self.lookup(ticker).map(|(metadata, _)| metadata.clone())
    }

    async fn fetch_daily_closes(&self, ticker: &Ticker) -> Result<PriceSeries, ApiError> {
        self.lookup(ticker).map(|(_, series)| series.clone())
    }
}
