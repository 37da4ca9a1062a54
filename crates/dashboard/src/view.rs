use analytics::Bucket;
use chrono::NaiveDate;
use core_types::StdDevKind;
use serde::Serialize;

/// Everything a surface needs to draw one dashboard run.
///
/// Built fresh for every submitted ticker; nothing is retained between runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewModel {
    /// No ticker was submitted yet.
    Prompt {
        message: String,
        examples: Vec<TickerExample>,
    },
    /// The ticker could not be resolved, for whatever reason.
    Unresolved { input: String, message: String },
    Ready(Dashboard),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerExample {
    pub symbol: &'static str,
    pub description: &'static str,
}

/// A fully populated dashboard, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub ticker: String,
    pub title: String,
    pub metadata: MetadataBlock,
    pub price_chart: LineChart,
    pub cagr_formula: String,
    pub cagr_rows: Vec<CagrRow>,
    pub volatility: VolatilityBlock,
    pub returns_histogram: HistogramChart,
    pub explanations: Vec<Explanation>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataBlock {
    pub name: String,
    pub sector: String,
    pub industry: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CagrRow {
    pub period: String,
    /// The raw rate as a fraction; absent when "not available".
    pub value: Option<f64>,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolatilityBlock {
    pub value: Option<f64>,
    pub formatted: String,
    pub formula: String,
    pub estimator: StdDevKind,
    pub observations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramChart {
    pub title: String,
    pub x_label: String,
    pub buckets: Vec<Bucket>,
    /// Where the reference line is drawn; absent when there is nothing to plot.
    pub zero_marker: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub title: String,
    pub body: String,
}
