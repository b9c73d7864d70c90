//! Writes the result table to disk as CSV and JSON.

use crate::archive::fetcher::FetchOutcome;
use crate::export::error::ExportError;
use crate::export::result_table::{ResultTable, TableSummary};
use crate::types::date_range::DateRange;
use bon::Builder;
use log::info;
use polars::prelude::{CsvWriter, SerWriter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tokio::{fs, task};

/// Default prefix of the output file names.
pub const DEFAULT_FILE_STEM: &str = "weather_data";

/// Where and under which name the output files are written.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ExportSettings {
    /// Directory receiving both files; created if missing.
    #[builder(into, default = PathBuf::from("."))]
    pub output_dir: PathBuf,
    /// File names are `<file_stem>_<start>_<end>.csv` and `.json`.
    #[builder(into, default = DEFAULT_FILE_STEM.to_string())]
    pub file_stem: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ExportSettings {
    /// Output path for `extension`, named after the range boundaries.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use std::path::Path;
    /// use weather_harvest::{DateRange, ExportSettings};
    ///
    /// let range = DateRange::new(
    ///     NaiveDate::from_ymd_opt(2023, 8, 27).unwrap(),
    ///     NaiveDate::from_ymd_opt(2025, 8, 26).unwrap(),
    /// )
    /// .unwrap();
    /// let settings = ExportSettings::builder().output_dir("out").build();
    ///
    /// assert_eq!(
    ///     settings.file_path(&range, "csv"),
    ///     Path::new("out/weather_data_2023-08-27_2025-08-26.csv")
    /// );
    /// ```
    pub fn file_path(&self, range: &DateRange, extension: &str) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{}_{}.{}",
            self.file_stem, range.start, range.end, extension
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub csv: PathBuf,
    pub json: PathBuf,
}

/// Everything produced by a successful export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub table: ResultTable,
    pub summary: TableSummary,
    pub files: OutputFiles,
}

/// Consolidates `outcomes` and writes both output files.
///
/// Nothing is written when no outcome is a success.
///
/// # Errors
///
/// Returns [`ExportError::NoSuccessfulLocations`] if every location failed,
/// or one of the I/O and encoding variants of [`ExportError`] if writing fails.
pub async fn export<'a>(
    outcomes: impl IntoIterator<Item = &'a FetchOutcome>,
    range: &DateRange,
    settings: &ExportSettings,
) -> Result<ExportReport, ExportError> {
    let table = ResultTable::from_outcomes(outcomes)?;
    let summary = table.summary();
    info!(
        "Combined {} records from {} locations",
        summary.rows, summary.locations
    );

    fs::create_dir_all(&settings.output_dir)
        .await
        .map_err(|e| ExportError::OutputDir(settings.output_dir.clone(), e))?;

    let files = OutputFiles {
        csv: settings.file_path(range, "csv"),
        json: settings.file_path(range, "json"),
    };

    let (table, files) = task::spawn_blocking(move || {
        write_csv(&table, &files.csv)?;
        info!("Data saved: {}", files.csv.display());
        write_json(&table, &files.json)?;
        info!("Also saved in JSON format: {}", files.json.display());
        Ok::<_, ExportError>((table, files))
    })
    .await??;

    Ok(ExportReport {
        table,
        summary,
        files,
    })
}

/// Writes `table` as UTF-8 CSV with a byte-order mark and a header row.
pub fn write_csv(table: &ResultTable, path: &Path) -> Result<(), ExportError> {
    let mut frame = table.to_frame().map_err(ExportError::Frame)?;
    let file =
        File::create(path).map_err(|e| ExportError::CsvWriteIo(path.to_path_buf(), e))?;
    let mut writer = BufWriter::new(file);
    CsvWriter::new(&mut writer)
        .include_bom(true)
        .include_header(true)
        .finish(&mut frame)
        .map_err(|e| ExportError::CsvWritePolars(path.to_path_buf(), e))?;
    writer
        .flush()
        .map_err(|e| ExportError::CsvWriteIo(path.to_path_buf(), e))
}

/// Writes `table` as a pretty-printed JSON array of record objects.
pub fn write_json(table: &ResultTable, path: &Path) -> Result<(), ExportError> {
    let file =
        File::create(path).map_err(|e| ExportError::JsonWriteIo(path.to_path_buf(), e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, table.records())
        .map_err(|e| ExportError::JsonEncode(path.to_path_buf(), e))?;
    writer
        .flush()
        .map_err(|e| ExportError::JsonWriteIo(path.to_path_buf(), e))
}
