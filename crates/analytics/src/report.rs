use crate::histogram::Histogram;
use core_types::Period;
use serde::{Deserialize, Serialize};

/// The CAGR for one look-back window; `None` means "not available".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CagrResult {
    pub period: Period,
    pub value: Option<f64>,
}

impl CagrResult {
    pub fn not_available(period: Period) -> Self {
        Self {
            period,
            value: None,
        }
    }
}

/// Everything the metrics engine derives from one price series.
///
/// This is the output of [`crate::MetricsEngine::analyze`] and the input of
/// the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Exactly three rows: 1, 3 and 5 years.
    pub cagr: Vec<CagrResult>,
    /// Annualized volatility; `None` with fewer than two prices.
    pub volatility: Option<f64>,
    pub returns: Vec<f64>,
    pub histogram: Option<Histogram>,
    /// Number of prices the report was computed from.
    pub observations: usize,
}

impl MetricsReport {
    pub fn cagr_for(&self, period: Period) -> Option<f64> {
        self.cagr
            .iter()
            .find(|r| r.period == period)
            .and_then(|r| r.value)
    }
}
