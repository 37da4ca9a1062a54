use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("No ticker symbol was provided")]
    EmptyTicker,

    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}
