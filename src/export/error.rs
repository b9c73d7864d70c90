use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data could be fetched for any location")]
    NoSuccessfulLocations,

    #[error("Failed to create output directory '{0}'")]
    OutputDir(PathBuf, #[source] std::io::Error),

    #[error("Failed building the result DataFrame")]
    Frame(#[source] PolarsError),

    // Errors during CSV writing (inside blocking task)
    #[error("I/O error writing CSV file '{0}'")]
    CsvWriteIo(PathBuf, #[source] std::io::Error),
    #[error("Encoding error writing CSV file '{0}'")]
    CsvWritePolars(PathBuf, #[source] PolarsError),

    #[error("I/O error writing JSON file '{0}'")]
    JsonWriteIo(PathBuf, #[source] std::io::Error),
    #[error("Encoding error writing JSON file '{0}'")]
    JsonEncode(PathBuf, #[source] serde_json::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
