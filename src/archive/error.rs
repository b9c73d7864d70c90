use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a single attempt against the archive did not yield records.
///
/// These errors never leave the fetch pipeline: each one is turned into a
/// skipped location (see [`crate::FetchOutcome::Failure`]).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request did not complete within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Rate limited by the archive (HTTP 429)")]
    RateLimited,

    #[error("Network request failed: {0}")]
    Network(#[source] BoxError),

    #[error("HTTP request failed with status {0}")]
    HttpStatus(StatusCode),

    #[error("Archive returned an empty response")]
    EmptyResponse,

    #[error("Failed to parse archive response: {0}")]
    Parse(String),

    #[error("Archive response contains no daily data")]
    NoData,
}

/// Outcome classes driving the retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Timeout,
    RateLimited,
    NetworkError,
    EmptyResponse,
    ParseError,
    NoData,
}

impl FetchError {
    pub fn classification(&self) -> Classification {
        match self {
            FetchError::Timeout(_) => Classification::Timeout,
            FetchError::RateLimited => Classification::RateLimited,
            FetchError::Network(_) | FetchError::HttpStatus(_) => Classification::NetworkError,
            FetchError::EmptyResponse => Classification::EmptyResponse,
            FetchError::Parse(_) => Classification::ParseError,
            FetchError::NoData => Classification::NoData,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classification::Timeout => "timeout",
            Classification::RateLimited => "rate limited",
            Classification::NetworkError => "network error",
            Classification::EmptyResponse => "empty response",
            Classification::ParseError => "parse error",
            Classification::NoData => "no data",
        };
        f.write_str(name)
    }
}
