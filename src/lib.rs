mod archive;
mod error;
mod export;
mod harvester;
mod locations;
mod types;

#[cfg(test)]
mod testing;

pub use error::HarvestError;
pub use harvester::*;

pub use archive::error::{BoxError, Classification, FetchError};
pub use archive::fetcher::{DailyFetcher, FetchOutcome, LocationOutcome};
pub use archive::request::{ArchiveRequest, ARCHIVE_URL, DEFAULT_TIMEZONE};
pub use archive::response::parse_daily_response;
pub use archive::retry::{RetryPolicy, RetryTier};
pub use archive::settings::{FetchSettings, DEFAULT_COURTESY_DELAY};
pub use archive::transport::{ArchiveReply, ArchiveTransport, HttpTransport, TransportError};

pub use types::daily_record::DailyRecord;
pub use types::daily_variable::DailyVariable;
pub use types::date_range::{DateRange, HISTORY_DAYS};
pub use types::location::Location;

pub use locations::error::LocationSourceError;
pub use locations::location_source::{LocationConfig, DEFAULT_CONFIG_FILE};

pub use export::error::ExportError;
pub use export::result_table::{RegionCount, ResultTable, TableSummary, LOCATION_COLUMNS};
pub use export::writer::{
    export, write_csv, write_json, ExportReport, ExportSettings, OutputFiles, DEFAULT_FILE_STEM,
};
