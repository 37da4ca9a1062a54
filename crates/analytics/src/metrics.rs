use crate::error::AnalyticsError;
use crate::report::CagrResult;
use core_types::{Period, PriceSeries, StdDevKind};

/// The trading-day convention used to annualize daily figures.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Compound annual growth rate: `(end / start)^(1 / years) - 1`.
///
/// Returns NaN (or an infinity) when `start` or `years` is not positive;
/// use [`checked_cagr`] when the inputs are not already known to be valid.
pub fn cagr(start: f64, end: f64, years: f64) -> f64 {
    (end / start).powf(1.0 / years) - 1.0
}

/// [`cagr`] with its domain enforced.
pub fn checked_cagr(start: f64, end: f64, years: f64) -> Result<f64, AnalyticsError> {
    if !(start.is_finite() && end.is_finite() && years.is_finite()) {
        return Err(AnalyticsError::Domain {
            metric: "cagr",
            reason: "inputs must be finite".to_string(),
        });
    }
    if start <= 0.0 {
        return Err(AnalyticsError::Domain {
            metric: "cagr",
            reason: format!("start price must be positive, got {}", start),
        });
    }
    if years <= 0.0 {
        return Err(AnalyticsError::Domain {
            metric: "cagr",
            reason: format!("years must be positive, got {}", years),
        });
    }
    Ok(cagr(start, end, years))
}

/// Day-over-day percentage change, one value per consecutive pair of closes.
pub fn daily_returns(series: &PriceSeries) -> Vec<f64> {
    series
        .points()
        .windows(2)
        .map(|w| (w[1].close - w[0].close) / w[0].close)
        .collect()
}

/// Standard deviation of `values`, or `None` when the estimator is undefined
/// (no values, or a single value with the sample estimator).
pub fn std_dev(values: &[f64], kind: StdDevKind) -> Option<f64> {
    let n = values.len();
    let denominator = match kind {
        StdDevKind::Sample if n >= 2 => (n - 1) as f64,
        StdDevKind::Population if n >= 1 => n as f64,
        _ => return None,
    };

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values
        .iter()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        / denominator;

    Some(variance.sqrt())
}

/// `std_dev(returns) * sqrt(252)`.
pub fn annualized_volatility(returns: &[f64], kind: StdDevKind) -> Option<f64> {
    std_dev(returns, kind).map(|sd| sd * (TRADING_DAYS_PER_YEAR as f64).sqrt())
}

/// CAGR for the 1, 3 and 5 year windows, each ending at the latest close.
///
/// The 1 and 3 year figures start 252 and 756 trading days before the last
/// close and are only reported when the series holds that many points. The
/// 5 year figure always spans the first to the last point, however short the
/// series is.
pub fn cagr_table(series: &PriceSeries) -> Vec<CagrResult> {
    let Some(last) = series.last().map(|p| p.close) else {
        return Period::ALL.iter().map(|&p| CagrResult::not_available(p)).collect();
    };

    Period::ALL
        .iter()
        .map(|&period| {
            let start = match period.required_points() {
                Some(required) if series.len() >= required => series.close_back(required),
                Some(_) => None,
                None => series.first().map(|p| p.close),
            };
            let value = start
                .and_then(|start| checked_cagr(start, last, f64::from(period.years())).ok());
            CagrResult { period, value }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use core_types::PricePoint;

    fn series_from(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + Days::new(i as u64), c))
            .collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn ten_percent_for_five_years() {
        assert_close(cagr(100.0, 161.051, 5.0), 0.10);
    }

    #[test]
    fn no_growth_is_zero_rate() {
        for (p, n) in [(1.0, 1.0), (42.5, 3.0), (1000.0, 5.0)] {
            assert_close(cagr(p, p, n), 0.0);
        }
    }

    #[test]
    fn cagr_increases_with_end_price() {
        let rates: Vec<f64> = [50.0, 90.0, 100.0, 120.0, 300.0]
            .iter()
            .map(|&end| cagr(100.0, end, 3.0))
            .collect();
        assert!(rates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn checked_cagr_rejects_invalid_domain() {
        assert!(checked_cagr(0.0, 10.0, 1.0).is_err());
        assert!(checked_cagr(10.0, 10.0, 0.0).is_err());
        assert!(checked_cagr(f64::NAN, 10.0, 1.0).is_err());
        assert!(cagr(0.0, 10.0, 1.0).is_infinite());
    }

    #[test]
    fn returns_drop_the_leading_element() {
        let returns = daily_returns(&series_from(&[100.0, 110.0, 99.0]));
        assert_eq!(returns.len(), 2);
        assert_close(returns[0], 0.10);
        assert_close(returns[1], -0.10);
        assert!(daily_returns(&series_from(&[100.0])).is_empty());
    }

    #[test]
    fn sample_and_population_estimators_differ() {
        let values = [0.01, -0.02, 0.03, 0.0];
        let sample = std_dev(&values, StdDevKind::Sample).unwrap();
        let population = std_dev(&values, StdDevKind::Population).unwrap();
        assert_close(sample, 0.0208166600);
        assert_close(population, 0.0180277564);
        assert_eq!(std_dev(&[0.5], StdDevKind::Sample), None);
        assert_eq!(std_dev(&[0.5], StdDevKind::Population), Some(0.0));
        assert_eq!(std_dev(&[], StdDevKind::Population), None);
    }

    #[test]
    fn constant_prices_have_zero_volatility() {
        let returns = daily_returns(&series_from(&[20.0; 30]));
        assert_eq!(annualized_volatility(&returns, StdDevKind::Sample), Some(0.0));
    }

    #[test]
    fn volatility_is_annualized_and_non_negative() {
        let returns = [0.01, -0.01, 0.01, -0.01];
        let vol = annualized_volatility(&returns, StdDevKind::Sample).unwrap();
        let daily = std_dev(&returns, StdDevKind::Sample).unwrap();
        assert!(vol >= 0.0);
        assert_close(vol, daily * 252f64.sqrt());
    }

    #[test]
    fn one_year_needs_252_points() {
        let mut closes = vec![100.0; 251];
        closes.push(110.0);
        let table = cagr_table(&series_from(&closes));
        assert_close(table[0].value.unwrap(), 0.10);

        let table = cagr_table(&series_from(&closes[1..]));
        assert_eq!(table[0].value, None);
    }

    #[test]
    fn three_years_needs_756_points() {
        let closes: Vec<f64> = (0..756).map(|i| 100.0 + i as f64).collect();
        let table = cagr_table(&series_from(&closes));
        assert!(table[1].value.is_some());
        let table = cagr_table(&series_from(&closes[1..]));
        assert_eq!(table[1].value, None);
    }

    #[test]
    fn five_years_has_no_length_guard() {
        let table = cagr_table(&series_from(&[100.0, 101.0, 102.0, 103.0, 161.051]));
        assert_eq!(table[0].value, None);
        assert_eq!(table[1].value, None);
        assert_close(table[2].value.unwrap(), 0.10);
    }

    #[test]
    fn empty_series_is_not_available_everywhere() {
        let table = cagr_table(&PriceSeries::default());
        assert_eq!(table.len(), 3);
        assert!(table.iter().all(|r| r.value.is_none()));
    }
}
