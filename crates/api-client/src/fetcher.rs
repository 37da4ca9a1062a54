use crate::error::ApiError;
use crate::MarketDataProvider;
use chrono::NaiveDate;
use core_types::{CoreError, PriceSeries, Ticker, TickerMetadata};
use serde::Serialize;

/// The outcome of one fetch. Every failure mode collapses into `Invalid`;
/// the reason is kept for logging and is not meant to be shown to users.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Valid {
        ticker: Ticker,
        metadata: TickerMetadata,
        series: PriceSeries,
    },
    Invalid(InvalidReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum InvalidReason {
    /// Nothing was typed.
    EmptyInput,
    /// The input cannot be a ticker symbol.
    MalformedTicker(String),
    /// The provider does not recognize the symbol.
    UnresolvedMetadata,
    /// The symbol resolved but no closes fall in the history window.
    NoHistory,
    /// Network or provider fault.
    Provider(String),
}

impl From<ApiError> for InvalidReason {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::NotFound(_) => InvalidReason::UnresolvedMetadata,
            other => InvalidReason::Provider(other.to_string()),
        }
    }
}

/// Resolves raw user input into metadata and the trailing `history_years` of
/// daily closes ending at `as_of`.
///
/// The input is trimmed and uppercased. Metadata is requested first and the
/// history is only requested once the symbol resolves.
pub async fn fetch_ticker(
    provider: &dyn MarketDataProvider,
    raw: &str,
    as_of: NaiveDate,
    history_years: u32,
) -> FetchResult {
    let ticker = match Ticker::parse(raw) {
        Ok(ticker) => ticker,
        Err(CoreError::EmptyTicker) => return FetchResult::Invalid(InvalidReason::EmptyInput),
        Err(e) => return FetchResult::Invalid(InvalidReason::MalformedTicker(e.to_string())),
    };

    let metadata = match provider.fetch_metadata(&ticker).await {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::warn!(ticker = %ticker, error = %e, "Metadata lookup failed.");
            return FetchResult::Invalid(e.into());
        }
    };

    let series = match provider.fetch_daily_closes(&ticker).await {
        Ok(series) => series.trailing_years(history_years, as_of),
        Err(e) => {
            tracing::warn!(ticker = %ticker, error = %e, "Price history lookup failed.");
            return FetchResult::Invalid(e.into());
        }
    };

    if series.is_empty() {
        tracing::warn!(ticker = %ticker, "Provider returned no price history.");
        return FetchResult::Invalid(InvalidReason::NoHistory);
    }

    tracing::info!(ticker = %ticker, points = series.len(), "Fetched ticker data.");
    FetchResult::Valid {
        ticker,
        metadata,
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryProvider;
    use chrono::Days;
    use core_types::PricePoint;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
    }

    fn daily_series(start: NaiveDate, days: u64) -> PriceSeries {
        (0..days)
            .map(|i| PricePoint::new(start + Days::new(i), 100.0 + i as f64))
            .collect()
    }

    fn provider() -> InMemoryProvider {
        let metadata = TickerMetadata {
            symbol: Some("MSFT".to_string()),
            name: Some("Microsoft Corporation".to_string()),
            ..Default::default()
        };
        let series = daily_series(NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(), 3500);
        let stale = daily_series(NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(), 30);
        InMemoryProvider::new()
            .with_ticker("MSFT", metadata.clone(), series)
            .with_ticker("OLD", metadata.clone(), stale)
            .with_ticker("EMPTY", metadata, PriceSeries::default())
    }

    #[tokio::test]
    async fn valid_ticker_is_normalized_and_windowed() {
        let result = fetch_ticker(&provider(), " msft ", as_of(), 5).await;
        let FetchResult::Valid { ticker, series, .. } = result else {
            panic!("expected a valid result, got {:?}", result);
        };
        assert_eq!(ticker.as_str(), "MSFT");
        let cutoff = NaiveDate::from_ymd_opt(2019, 6, 28).unwrap();
        assert_eq!(series.first().unwrap().date, cutoff);
        assert!(series.last().unwrap().date <= as_of());
    }

    #[tokio::test]
    async fn empty_input_short_circuits() {
        let result = fetch_ticker(&InMemoryProvider::failing("unused"), "  ", as_of(), 5).await;
        assert_eq!(result, FetchResult::Invalid(InvalidReason::EmptyInput));
    }

    #[tokio::test]
    async fn malformed_input_is_invalid() {
        let result = fetch_ticker(&provider(), "NOT A TICKER", as_of(), 5).await;
        assert!(matches!(
            result,
            FetchResult::Invalid(InvalidReason::MalformedTicker(_))
        ));
    }

    #[tokio::test]
    async fn unknown_symbol_is_unresolved() {
        let result = fetch_ticker(&provider(), "NOPE", as_of(), 5).await;
        assert_eq!(result, FetchResult::Invalid(InvalidReason::UnresolvedMetadata));
    }

    #[tokio::test]
    async fn history_outside_window_is_no_history() {
        assert_eq!(
            fetch_ticker(&provider(), "OLD", as_of(), 5).await,
            FetchResult::Invalid(InvalidReason::NoHistory)
        );
        assert_eq!(
            fetch_ticker(&provider(), "EMPTY", as_of(), 5).await,
            FetchResult::Invalid(InvalidReason::NoHistory)
        );
    }

    #[tokio::test]
    async fn provider_fault_collapses_to_invalid() {
        let result = fetch_ticker(&InMemoryProvider::failing("connection reset"), "AAPL", as_of(), 5).await;
        assert!(matches!(result, FetchResult::Invalid(InvalidReason::Provider(msg)) if msg.contains("connection reset")));
    }
}
