use crate::export::error::ExportError;
use crate::locations::error::LocationSourceError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error(transparent)]
    LocationSource(#[from] LocationSourceError),

    #[error("No locations to fetch")]
    NoLocations,

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Failed to build the HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to compute the two-year window ending before {0}")]
    DateRange(NaiveDate),
}
