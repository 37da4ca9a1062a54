use crate::error::AnalyticsError;
use crate::histogram::{histogram, DEFAULT_HISTOGRAM_BINS};
use crate::metrics::{annualized_volatility, cagr_table, daily_returns};
use crate::report::MetricsReport;
use core_types::{PriceSeries, StdDevKind};

/// A stateless calculator for deriving return and risk metrics from a price series.
#[derive(Debug, Clone, Copy)]
pub struct MetricsEngine {
    std_dev: StdDevKind,
    histogram_bins: usize,
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self {
            std_dev: StdDevKind::default(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl MetricsEngine {
    pub fn new(std_dev: StdDevKind, histogram_bins: usize) -> Result<Self, AnalyticsError> {
        if histogram_bins == 0 {
            return Err(AnalyticsError::InvalidParameter(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            std_dev,
            histogram_bins,
        })
    }

    /// The main entry point for calculating metrics.
    ///
    /// # Arguments
    ///
    /// * `series` - Daily closes, ascending by date.
    ///
    /// # Returns
    ///
    /// A `MetricsReport`. Metrics that cannot be computed from the available
    /// history are reported as absent rather than as NaN.
    pub fn analyze(&self, series: &PriceSeries) -> Result<MetricsReport, AnalyticsError> {
        if series.is_empty() {
            return Err(AnalyticsError::NotEnoughData(
                "price series is empty".to_string(),
            ));
        }

        let cagr = cagr_table(series);
        let returns = daily_returns(series);
        let volatility = annualized_volatility(&returns, self.std_dev);

        let histogram = if returns.is_empty() {
            None
        } else {
            Some(histogram(&returns, self.histogram_bins)?)
        };

        tracing::debug!(
            observations = series.len(),
            returns = returns.len(),
            volatility = ?volatility,
            "Computed metrics."
        );

        Ok(MetricsReport {
            cagr,
            volatility,
            returns,
            histogram,
            observations: series.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use core_types::{Period, PricePoint};

    fn growing_series(days: usize, daily_growth: f64) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2019, 1, 2).unwrap();
        (0..days)
            .map(|i| {
                PricePoint::new(
                    start + Days::new(i as u64),
                    100.0 * (1.0 + daily_growth).powi(i as i32),
                )
            })
            .collect()
    }

    #[test]
    fn full_history_populates_every_metric() {
        let series = growing_series(1260, 0.0004);
        let report = MetricsEngine::default().analyze(&series).unwrap();

        assert_eq!(report.observations, 1260);
        assert_eq!(report.returns.len(), 1259);
        for period in Period::ALL {
            let value = report.cagr_for(period).unwrap();
            assert!(value.is_finite() && value > 0.0);
        }
        // Constant growth has no dispersion.
        assert!(report.volatility.unwrap().abs() < 1e-9);
        assert_eq!(report.histogram.unwrap().total(), 1259);
    }

    #[test]
    fn single_price_has_no_volatility() {
        let series = growing_series(1, 0.0);
        let report = MetricsEngine::default().analyze(&series).unwrap();
        assert_eq!(report.volatility, None);
        assert_eq!(report.histogram, None);
        assert_eq!(report.cagr_for(Period::FiveYears), Some(0.0));
    }

    #[test]
    fn empty_series_is_rejected() {
        let result = MetricsEngine::default().analyze(&PriceSeries::default());
        assert!(matches!(result, Err(AnalyticsError::NotEnoughData(_))));
    }

    #[test]
    fn zero_bins_are_rejected() {
        assert!(MetricsEngine::new(StdDevKind::Sample, 0).is_err());
    }
}
