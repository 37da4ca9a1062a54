use crate::error::CoreError;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_TICKER_LEN: usize = 12;

/// A normalized ticker symbol (trimmed and uppercased).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Normalizes raw user input into a ticker.
    ///
    /// Accepts letters, digits and the punctuation used by index and share
    /// class symbols (`.`, `-`, `^`, `=`), e.g. `BRK.B` or `^GSPC`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(CoreError::EmptyTicker);
        }
        if symbol.len() > MAX_TICKER_LEN {
            return Err(CoreError::InvalidInput(
                "ticker".to_string(),
                format!("'{}' is longer than {} characters", symbol, MAX_TICKER_LEN),
            ));
        }
        if let Some(c) = symbol
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
        {
            return Err(CoreError::InvalidInput(
                "ticker".to_string(),
                format!("unexpected character '{}' in '{}'", c, symbol),
            ));
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptive profile fields for a ticker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerMetadata {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
}

impl TickerMetadata {
    pub fn name_or_na(&self) -> &str {
        self.name.as_deref().unwrap_or("N/A")
    }

    pub fn sector_or_na(&self) -> &str {
        self.sector.as_deref().unwrap_or("N/A")
    }

    pub fn industry_or_na(&self) -> &str {
        self.industry.as_deref().unwrap_or("N/A")
    }

    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or("Description not available")
    }
}

/// A single daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Daily closing prices, ascending by date, one point per trading day.
///
/// Every close held by the series is finite and strictly positive, so ratios
/// between any two points are always defined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries(Vec<PricePoint>);

impl PriceSeries {
    /// Builds a series from unordered points.
    ///
    /// Points are sorted by date; non-finite or non-positive closes are
    /// dropped, and when a date appears twice the later entry wins.
    pub fn new(points: Vec<PricePoint>) -> Self {
        let mut points: Vec<PricePoint> = points
            .into_iter()
            .filter(|p| p.close.is_finite() && p.close > 0.0)
            .collect();
        points.sort_by_key(|p| p.date);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self(deduped)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.0
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.0.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.close).collect()
    }

    /// The close `offset` positions from the end, where an offset of 1 is the
    /// most recent close and an offset equal to `len()` is the first one.
    pub fn close_back(&self, offset: usize) -> Option<f64> {
        if offset == 0 || offset > self.0.len() {
            return None;
        }
        Some(self.0[self.0.len() - offset].close)
    }

    /// The points dated from `as_of` minus `years` calendar years up to and
    /// including `as_of`.
    pub fn trailing_years(&self, years: u32, as_of: NaiveDate) -> Self {
        let cutoff = as_of
            .checked_sub_months(Months::new(years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN);
        Self(
            self.0
                .iter()
                .filter(|p| p.date >= cutoff && p.date <= as_of)
                .copied()
                .collect(),
        )
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
