use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("Input outside the domain of '{metric}': {reason}")]
    Domain { metric: &'static str, reason: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
