//! Main entry point of the library: fetch every configured location, then
//! consolidate and export the results.

use crate::archive::fetcher::{DailyFetcher, LocationOutcome};
use crate::archive::settings::FetchSettings;
use crate::archive::transport::{ArchiveTransport, HttpTransport};
use crate::error::HarvestError;
use crate::export::writer::{export, ExportReport, ExportSettings};
use crate::locations::location_source::LocationConfig;
use crate::types::date_range::DateRange;
use crate::types::location::Location;
use bon::bon;
use chrono::{Local, NaiveDate};
use log::info;

/// Outcome of a completed run.
#[derive(Debug)]
pub struct HarvestReport {
    pub range: DateRange,
    /// Per-location outcomes, in configuration order.
    pub outcomes: Vec<LocationOutcome>,
    pub export: ExportReport,
}

impl HarvestReport {
    pub fn successes(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome.is_success())
            .count()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.len() - self.successes()
    }
}

/// Harvests daily weather history for a list of locations.
///
/// The harvester owns a [`DailyFetcher`] and the export settings. Create one
/// with [`Harvester::new`] to talk to the real archive, or with
/// [`Harvester::with_transport`] to plug in another [`ArchiveTransport`].
///
/// # Examples
///
/// ```no_run
/// # use weather_harvest::{ExportSettings, FetchSettings, Harvester, HarvestError, LocationConfig};
/// # use std::path::Path;
/// # #[tokio::main]
/// # async fn main() -> Result<(), HarvestError> {
/// let config = LocationConfig::load(Path::new("cities_config.json")).await?;
/// let harvester = Harvester::new(FetchSettings::default(), ExportSettings::default())?;
///
/// let report = harvester
///     .harvest()
///     .locations(&config.locations)
///     .call()
///     .await?;
///
/// println!("{} records written to {}", report.export.summary.rows, report.export.files.csv.display());
/// # Ok(())
/// # }
/// ```
pub struct Harvester<T = HttpTransport> {
    fetcher: DailyFetcher<T>,
    export: ExportSettings,
}

impl Harvester<HttpTransport> {
    /// Creates a harvester backed by an HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::HttpClient`] if the TLS backend cannot be initialized.
    pub fn new(settings: FetchSettings, export: ExportSettings) -> Result<Self, HarvestError> {
        let transport = HttpTransport::new().map_err(HarvestError::HttpClient)?;
        Ok(Self::with_transport(transport, settings, export))
    }

    /// Creates a harvester from a loaded config, applying its timezone.
    pub fn from_config(
        config: &LocationConfig,
        settings: FetchSettings,
        export: ExportSettings,
    ) -> Result<Self, HarvestError> {
        let settings = match &config.timezone {
            Some(timezone) => FetchSettings {
                timezone: timezone.clone(),
                ..settings
            },
            None => settings,
        };
        Self::new(settings, export)
    }
}

#[bon]
impl<T: ArchiveTransport> Harvester<T> {
    pub fn with_transport(transport: T, settings: FetchSettings, export: ExportSettings) -> Self {
        Self {
            fetcher: DailyFetcher::new(transport, settings),
            export,
        }
    }

    pub fn fetcher(&self) -> &DailyFetcher<T> {
        &self.fetcher
    }

    /// Fetches every location, then writes the consolidated table.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.locations(&[Location])`: **Required.** Locations to fetch, in order.
    /// * `.range(DateRange)`: Optional. Days to fetch. Defaults to the two
    ///   years ending yesterday, see [`DateRange::last_two_years`].
    /// * `.today(NaiveDate)`: Optional. Reference day for the default range.
    ///   Defaults to the local date.
    ///
    /// # Errors
    ///
    /// * [`HarvestError::NoLocations`] if `locations` is empty; nothing is fetched.
    /// * [`HarvestError::Export`] with [`crate::ExportError::NoSuccessfulLocations`]
    ///   if every location failed; no file is written.
    /// * [`HarvestError::Export`] if writing the output files fails.
    ///
    /// Individual location failures are not errors: they are logged and left
    /// out of the table.
    #[builder]
    pub async fn harvest(
        &self,
        locations: &[Location],
        range: Option<DateRange>,
        today: Option<NaiveDate>,
    ) -> Result<HarvestReport, HarvestError> {
        if locations.is_empty() {
            return Err(HarvestError::NoLocations);
        }

        let range = match range {
            Some(range) => range,
            None => {
                let today = today.unwrap_or_else(|| Local::now().date_naive());
                DateRange::last_two_years(today).ok_or(HarvestError::DateRange(today))?
            }
        };
        info!(
            "Fetching {} days ({}) for {} locations",
            range.num_days(),
            range,
            locations.len()
        );

        let outcomes = self.fetcher.fetch_all(locations, &range).await;
        let export = export(outcomes.iter().map(|o| &o.outcome), &range, &self.export).await?;

        Ok(HarvestReport {
            range,
            outcomes,
            export,
        })
    }
}
