use crate::error::AnalyticsError;
use serde::{Deserialize, Serialize};

/// Bucket count used for the daily return distribution.
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

/// A half-open interval `[start, end)` and the number of values in it.
/// The last bucket is closed so the maximum value is counted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bucket {
    /// Inclusive on both ends, so a boundary value matches the lower bucket first.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value <= self.end
    }
}

/// An equal-width frequency distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub buckets: Vec<Bucket>,
    /// Position of the reference line drawn over the distribution.
    pub zero_marker: f64,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Index of the bucket the zero marker falls in, if it lies within range.
    pub fn marker_bucket(&self) -> Option<usize> {
        self.buckets.iter().position(|b| b.contains(self.zero_marker))
    }
}

/// Sorts `values` into `bins` equal-width buckets spanning their range.
///
/// Non-finite values are ignored. If every value is equal the distribution
/// collapses into a single zero-width bucket.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram, AnalyticsError> {
    if bins == 0 {
        return Err(AnalyticsError::InvalidParameter(
            "histogram needs at least one bucket".to_string(),
        ));
    }

    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Err(AnalyticsError::NotEnoughData(
            "histogram needs at least one finite value".to_string(),
        ));
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return Ok(Histogram {
            buckets: vec![Bucket {
                start: min,
                end: max,
                count: finite.len(),
            }],
            zero_marker: 0.0,
        });
    }

    let width = (max - min) / bins as f64;
    let mut buckets: Vec<Bucket> = (0..bins)
        .map(|i| Bucket {
            start: min + width * i as f64,
            end: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for value in finite {
        let index = (((value - min) / width) as usize).min(bins - 1);
        buckets[index].count += 1;
    }

    Ok(Histogram {
        buckets,
        zero_marker: 0.0,
    })
}
