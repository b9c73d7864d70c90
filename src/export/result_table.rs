//! The consolidated table of all successfully fetched records.

use crate::archive::fetcher::FetchOutcome;
use crate::export::error::ExportError;
use crate::types::daily_record::DailyRecord;
use crate::types::daily_variable::DailyVariable;
use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, PolarsResult};
use std::collections::{BTreeMap, HashSet};

/// Fixed location columns, appended after the variable columns.
pub const LOCATION_COLUMNS: [&str; 5] =
    ["location", "latitude", "longitude", "region", "population"];

/// All records of a run, in location order and then in archive order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    records: Vec<DailyRecord>,
}

/// Number of distinct locations configured with a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCount {
    pub region: String,
    pub locations: usize,
}

/// Aggregate figures printed after a run.
///
/// Means skip rows where the field is null; a field that is null everywhere
/// has no mean. Rows themselves are never dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub rows: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub locations: usize,
    pub mean_temperature_max: Option<f64>,
    pub mean_temperature_min: Option<f64>,
    pub mean_precipitation: Option<f64>,
    /// Sorted by location count (descending), then by region name.
    pub regions: Vec<RegionCount>,
}

impl ResultTable {
    /// Concatenates the records of all successful outcomes, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NoSuccessfulLocations`] if no outcome is a success.
    pub fn from_outcomes<'a>(
        outcomes: impl IntoIterator<Item = &'a FetchOutcome>,
    ) -> Result<Self, ExportError> {
        let mut records = Vec::new();
        let mut any_success = false;
        for outcome in outcomes {
            if let FetchOutcome::Success(batch) = outcome {
                any_success = true;
                records.extend(batch.iter().cloned());
            }
        }

        if !any_success {
            return Err(ExportError::NoSuccessfulLocations);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> TableSummary {
        let dates = self.records.iter().map(|r| r.date);
        let locations: HashSet<&str> = self.records.iter().map(|r| r.location.as_str()).collect();

        let mut per_region: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();
        for record in &self.records {
            if let Some(region) = record.region.as_deref() {
                per_region
                    .entry(region)
                    .or_default()
                    .insert(record.location.as_str());
            }
        }
        let mut regions: Vec<RegionCount> = per_region
            .into_iter()
            .map(|(region, names)| RegionCount {
                region: region.to_string(),
                locations: names.len(),
            })
            .collect();
        // Stable sort keeps the alphabetical order of the BTreeMap for ties.
        regions.sort_by(|a, b| b.locations.cmp(&a.locations));

        TableSummary {
            rows: self.records.len(),
            first_date: dates.clone().min(),
            last_date: dates.max(),
            locations: locations.len(),
            mean_temperature_max: self.mean(DailyVariable::Temperature2mMax),
            mean_temperature_min: self.mean(DailyVariable::Temperature2mMin),
            mean_precipitation: self.mean(DailyVariable::PrecipitationSum),
            regions,
        }
    }

    /// Arithmetic mean of `variable` over the rows where it is present.
    pub fn mean(&self, variable: DailyVariable) -> Option<f64> {
        let (sum, count) = self
            .records
            .iter()
            .filter_map(|r| r.value(variable))
            .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// Builds a Polars `DataFrame` with one row per record.
    ///
    /// Columns: `date` (Date), the fifteen variables (Float64, nullable), then
    /// `location`, `latitude`, `longitude`, `region`, `population`.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let records = &self.records;
        let mut columns = Vec::with_capacity(1 + DailyVariable::COUNT + LOCATION_COLUMNS.len());

        columns.push(Column::new(
            "date".into(),
            records.iter().map(|r| r.date).collect::<Vec<NaiveDate>>(),
        ));
        for variable in DailyVariable::ALL {
            columns.push(Column::new(
                variable.api_name().into(),
                records
                    .iter()
                    .map(|r| r.value(variable))
                    .collect::<Vec<Option<f64>>>(),
            ));
        }
        columns.push(Column::new(
            "location".into(),
            records.iter().map(|r| r.location.as_str()).collect::<Vec<&str>>(),
        ));
        columns.push(Column::new(
            "latitude".into(),
            records.iter().map(|r| r.latitude).collect::<Vec<f64>>(),
        ));
        columns.push(Column::new(
            "longitude".into(),
            records.iter().map(|r| r.longitude).collect::<Vec<f64>>(),
        ));
        columns.push(Column::new(
            "region".into(),
            records
                .iter()
                .map(|r| r.region.as_deref())
                .collect::<Vec<Option<&str>>>(),
        ));
        columns.push(Column::new(
            "population".into(),
            records.iter().map(|r| r.population).collect::<Vec<Option<u64>>>(),
        ));

        DataFrame::new(columns)
    }
}
