use serde::{Deserialize, Serialize};

/// The fixed look-back windows reported in the CAGR table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    OneYear,
    ThreeYears,
    FiveYears,
}

impl Period {
    /// All periods in the order they are displayed.
    pub const ALL: [Period; 3] = [Period::OneYear, Period::ThreeYears, Period::FiveYears];

    /// The number of years used as the CAGR exponent denominator.
    pub fn years(&self) -> u32 {
        match self {
            Period::OneYear => 1,
            Period::ThreeYears => 3,
            Period::FiveYears => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::OneYear => "1 year",
            Period::ThreeYears => "3 years",
            Period::FiveYears => "5 years",
        }
    }

    /// The minimum number of trading days the series must hold before the
    /// figure for this period is computed.
    ///
    /// The five-year window has no guard: it always pairs the first and last
    /// available closes, even when less than five years of history exist.
    pub fn required_points(&self) -> Option<usize> {
        match self {
            Period::OneYear => Some(252),
            Period::ThreeYears => Some(756),
            Period::FiveYears => None,
        }
    }
}

/// Which estimator of the standard deviation to use for volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdDevKind {
    /// Divide by `n - 1`.
    #[default]
    Sample,
    /// Divide by `n`.
    Population,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periods_are_ordered_by_length() {
        let years: Vec<u32> = Period::ALL.iter().map(Period::years).collect();
        assert_eq!(years, vec![1, 3, 5]);
    }

    #[test]
    fn only_the_five_year_window_is_unguarded() {
        assert_eq!(Period::OneYear.required_points(), Some(252));
        assert_eq!(Period::ThreeYears.required_points(), Some(756));
        assert_eq!(Period::FiveYears.required_points(), None);
    }

    #[test]
    fn std_dev_kind_defaults_to_sample() {
        assert_eq!(StdDevKind::default(), StdDevKind::Sample);
        let parsed: StdDevKind = serde_json::from_str("\"population\"").unwrap();
        assert_eq!(parsed, StdDevKind::Population);
    }
}
