use crate::format::{
    explanations, format_pct, CAGR_FORMULA, EXAMPLES, PROMPT_MESSAGE, UNRESOLVED_MESSAGE,
    VOLATILITY_FORMULA,
};
use crate::view::{
    CagrRow, ChartPoint, Dashboard, HistogramChart, LineChart, MetadataBlock, VolatilityBlock,
    ViewModel,
};
use analytics::{MetricsEngine, MetricsReport};
use api_client::{fetch_ticker, FetchResult, InvalidReason, MarketDataProvider};
use chrono::NaiveDate;
use configuration::MetricsConfig;
use core_types::{PriceSeries, StdDevKind, Ticker, TickerMetadata};

/// The per-run knobs of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    pub std_dev: StdDevKind,
    pub histogram_bins: usize,
    pub history_years: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            std_dev: StdDevKind::Sample,
            histogram_bins: analytics::DEFAULT_HISTOGRAM_BINS,
            history_years: 5,
        }
    }
}

impl From<&MetricsConfig> for DashboardSettings {
    fn from(config: &MetricsConfig) -> Self {
        Self {
            std_dev: config.std_dev,
            histogram_bins: config.histogram_bins,
            history_years: config.history_years,
        }
    }
}

/// Runs one fetch-compute-render cycle for the raw ticker input.
pub async fn render(
    provider: &dyn MarketDataProvider,
    input: &str,
    as_of: NaiveDate,
    settings: &DashboardSettings,
) -> ViewModel {
    let fetched = fetch_ticker(provider, input, as_of, settings.history_years).await;

    let (ticker, metadata, series) = match fetched {
        FetchResult::Valid {
            ticker,
            metadata,
            series,
        } => (ticker, metadata, series),
        FetchResult::Invalid(InvalidReason::EmptyInput) => return prompt(),
        FetchResult::Invalid(reason) => {
            tracing::info!(input, reason = ?reason, "Ticker unresolved.");
            return unresolved(input);
        }
    };

    let report = match MetricsEngine::new(settings.std_dev, settings.histogram_bins)
        .and_then(|engine| engine.analyze(&series))
    {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(ticker = %ticker, error = %e, "Metrics could not be computed.");
            return unresolved(input);
        }
    };

    ViewModel::Ready(build_dashboard(
        &ticker,
        &metadata,
        &series,
        &report,
        settings.std_dev,
        provider.name(),
    ))
}

pub fn prompt() -> ViewModel {
    ViewModel::Prompt {
        message: PROMPT_MESSAGE.to_string(),
        examples: EXAMPLES.to_vec(),
    }
}

pub fn unresolved(input: &str) -> ViewModel {
    ViewModel::Unresolved {
        input: input.trim().to_string(),
        message: UNRESOLVED_MESSAGE.to_string(),
    }
}

/// Assembles the dashboard from already fetched and computed data.
pub fn build_dashboard(
    ticker: &Ticker,
    metadata: &TickerMetadata,
    series: &PriceSeries,
    report: &MetricsReport,
    estimator: StdDevKind,
    source: &str,
) -> Dashboard {
    let title = match &metadata.name {
        Some(name) => format!("{} ({})", name, ticker),
        None => ticker.to_string(),
    };

    let price_chart = LineChart {
        title: format!("Price history of {}", ticker),
        x_label: "Date".to_string(),
        y_label: "Close (USD)".to_string(),
        points: series
            .points()
            .iter()
            .map(|p| ChartPoint {
                date: p.date,
                close: p.close,
            })
            .collect(),
    };

    let cagr_rows = report
        .cagr
        .iter()
        .map(|r| CagrRow {
            period: r.period.label().to_string(),
            value: r.value,
            formatted: format_pct(r.value),
        })
        .collect();

    let volatility = VolatilityBlock {
        value: report.volatility,
        formatted: format_pct(report.volatility),
        formula: VOLATILITY_FORMULA.to_string(),
        estimator,
        observations: report.returns.len(),
    };

    let returns_histogram = HistogramChart {
        title: "Distribution of daily returns".to_string(),
        x_label: "Daily return".to_string(),
        buckets: report
            .histogram
            .as_ref()
            .map(|h| h.buckets.clone())
            .unwrap_or_default(),
        zero_marker: report.histogram.as_ref().map(|h| h.zero_marker),
    };

    Dashboard {
        ticker: ticker.to_string(),
        title,
        metadata: MetadataBlock {
            name: metadata.name_or_na().to_string(),
            sector: metadata.sector_or_na().to_string(),
            industry: metadata.industry_or_na().to_string(),
            description: metadata.description_or_default().to_string(),
        },
        price_chart,
        cagr_formula: CAGR_FORMULA.to_string(),
        cagr_rows,
        volatility,
        returns_histogram,
        explanations: explanations(source),
        source: source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::InMemoryProvider;
    use chrono::Days;
    use core_types::PricePoint;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
    }

    /// Roughly one close per calendar day with a mild zig-zag so returns vary.
    fn history(start: NaiveDate, days: u64) -> PriceSeries {
        (0..days)
            .map(|i| {
                let wiggle = if i % 2 == 0 { 1.0 } else { -0.5 };
                PricePoint::new(start + Days::new(i), 100.0 + i as f64 * 0.05 + wiggle)
            })
            .collect()
    }

    fn provider() -> InMemoryProvider {
        let metadata = TickerMetadata {
            symbol: Some("SPY".to_string()),
            name: Some("SPDR S&P 500 ETF Trust".to_string()),
            sector: None,
            industry: None,
            description: Some("Tracks the S&P 500 index.".to_string()),
        };
        InMemoryProvider::new()
            .with_ticker(
                "SPY",
                metadata.clone(),
                history(NaiveDate::from_ymd_opt(2017, 1, 1).unwrap(), 2800),
            )
            .with_ticker(
                "NEW",
                metadata,
                history(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(), 5),
            )
    }

    #[tokio::test]
    async fn empty_input_prompts() {
        let view = render(&provider(), "", as_of(), &DashboardSettings::default()).await;
        let ViewModel::Prompt { message, examples } = view else {
            panic!("expected a prompt");
        };
        assert_eq!(message, PROMPT_MESSAGE);
        assert_eq!(examples.len(), 4);
    }

    #[tokio::test]
    async fn unknown_ticker_renders_nothing() {
        let view = render(&provider(), "nope", as_of(), &DashboardSettings::default()).await;
        assert_eq!(
            view,
            ViewModel::Unresolved {
                input: "nope".to_string(),
                message: UNRESOLVED_MESSAGE.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn network_failure_looks_like_unknown_ticker() {
        let offline = InMemoryProvider::failing("connection refused");
        let view = render(&offline, "SPY", as_of(), &DashboardSettings::default()).await;
        assert!(matches!(view, ViewModel::Unresolved { message, .. } if message == UNRESOLVED_MESSAGE));
    }

    #[tokio::test]
    async fn full_history_populates_every_section() {
        let view = render(&provider(), "spy", as_of(), &DashboardSettings::default()).await;
        let ViewModel::Ready(dashboard) = view else {
            panic!("expected a dashboard");
        };

        assert_eq!(dashboard.ticker, "SPY");
        assert_eq!(dashboard.title, "SPDR S&P 500 ETF Trust (SPY)");
        assert_eq!(dashboard.metadata.sector, "N/A");
        assert_eq!(dashboard.metadata.description, "Tracks the S&P 500 index.");
        assert_eq!(dashboard.price_chart.title, "Price history of SPY");
        assert!(dashboard.price_chart.points.len() > 756);

        let periods: Vec<&str> = dashboard.cagr_rows.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, vec!["1 year", "3 years", "5 years"]);
        for row in &dashboard.cagr_rows {
            assert!(row.value.unwrap().is_finite());
            assert!(row.formatted.ends_with('%'));
        }

        assert!(dashboard.volatility.value.unwrap() >= 0.0);
        assert!(dashboard.volatility.formatted.ends_with('%'));
        assert_eq!(dashboard.returns_histogram.buckets.len(), 50);
        assert_eq!(dashboard.returns_histogram.zero_marker, Some(0.0));
        assert_eq!(dashboard.source, "in-memory data");
    }

    #[tokio::test]
    async fn short_history_keeps_the_five_year_figure() {
        let view = render(&provider(), "NEW", as_of(), &DashboardSettings::default()).await;
        let ViewModel::Ready(dashboard) = view else {
            panic!("expected a dashboard");
        };
        let formatted: Vec<&str> = dashboard
            .cagr_rows
            .iter()
            .map(|r| r.formatted.as_str())
            .collect();
        assert_eq!(formatted[0], "N/A");
        assert_eq!(formatted[1], "N/A");
        assert_ne!(formatted[2], "N/A");
    }

    #[tokio::test]
    async fn view_model_serializes_with_status_tag() {
        let view = render(&provider(), "", as_of(), &DashboardSettings::default()).await;
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "prompt");

        let view = render(&provider(), "SPY", as_of(), &DashboardSettings::default()).await;
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["cagr_rows"].as_array().unwrap().len(), 3);
        assert_eq!(json["volatility"]["estimator"], "sample");
    }
}
