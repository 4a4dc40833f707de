/// Error types for the sensor crate
use thiserror::Error;

/// Main error type for sensor fetching and parsing
#[derive(Error, Debug)]
pub enum SensorError {
    /// No OpenAQ API key configured
    #[error("OpenAQ API key is missing")]
    MissingApiKey,

    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// The transport could not complete the request
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Bad response status {status} for {url}")]
    BadStatus { status: u16, url: String },

    /// Failed to decode a JSON response body
    #[error("Failed to parse HTTP response: {0}")]
    ResponseParse(#[from] serde_json::Error),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

/// Type alias for Results using SensorError
pub type Result<T> = std::result::Result<T, SensorError>;
