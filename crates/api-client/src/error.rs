use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to build the HTTP request: {0}")]
    RequestBuild(#[from] reqwest::Error),

    #[error("The API request returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("The provider rejected the request: {0}")]
    Provider(String),

    #[error("The provider does not know the symbol '{0}'")]
    NotFound(String),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(String),
}
