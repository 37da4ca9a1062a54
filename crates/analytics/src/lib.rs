//! # Stockscope Metrics Engine
//!
//! Pure, stateless calculations over a daily `PriceSeries`: compound annual
//! growth rate over fixed look-back windows, annualized volatility of daily
//! returns, and the distribution of those returns.
//!
//! Nothing in this crate performs I/O. It depends only on `core-types`.

pub mod engine;
pub mod error;
pub mod histogram;
pub mod metrics;
pub mod report;

pub use engine::MetricsEngine;
pub use error::AnalyticsError;
pub use histogram::{histogram, Bucket, Histogram, DEFAULT_HISTOGRAM_BINS};
pub use metrics::{
    annualized_volatility, cagr, cagr_table, checked_cagr, daily_returns, std_dev,
    TRADING_DAYS_PER_YEAR,
};
pub use report::{CagrResult, MetricsReport};
