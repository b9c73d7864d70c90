//! Validation of archive response bodies and conversion into [`DailyRecord`]s.

use crate::archive::error::FetchError;
use crate::types::daily_record::DailyRecord;
use crate::types::daily_variable::DailyVariable;
use crate::types::date_range::DateRange;
use crate::types::location::Location;
use log::warn;
use serde::Deserialize;
use serde_json::{Map, Value};

const SNIPPET_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct DailySection {
    time: Vec<String>,
    #[serde(flatten)]
    series: Map<String, Value>,
}

/// Turns one response body into the records of `location`.
///
/// The body must contain a `daily` object holding a `time` array of
/// `YYYY-MM-DD` dates and one array per [`DailyVariable`], each as long as
/// `time`. A variable missing from the section is treated as all-null. Rows
/// dated outside `range` are dropped.
///
/// # Errors
///
/// * [`FetchError::EmptyResponse`] for a blank body.
/// * [`FetchError::Parse`] for invalid JSON or a malformed `daily` section.
/// * [`FetchError::NoData`] when the document has no `daily` section.
pub fn parse_daily_response(
    body: &str,
    location: &Location,
    range: &DateRange,
) -> Result<Vec<DailyRecord>, FetchError> {
    if body.trim().is_empty() {
        return Err(FetchError::EmptyResponse);
    }

    let document: Value = serde_json::from_str(body).map_err(|e| {
        warn!(
            "JSON parse error for {}. Response starts with: '{}'",
            location.name,
            snippet(body)
        );
        FetchError::Parse(e.to_string())
    })?;

    let daily = match document.as_object().and_then(|doc| doc.get("daily")) {
        None | Some(Value::Null) => return Err(FetchError::NoData),
        Some(daily) => daily.clone(),
    };
    let section: DailySection = serde_json::from_value(daily)
        .map_err(|e| FetchError::Parse(format!("malformed daily section: {e}")))?;

    let dates = section
        .time
        .iter()
        .map(|raw| {
            chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| FetchError::Parse(format!("invalid date '{raw}' in daily.time")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut columns = Vec::with_capacity(DailyVariable::COUNT);
    for variable in DailyVariable::ALL {
        columns.push(extract_series(&section.series, variable, dates.len())?);
    }

    let mut records = Vec::with_capacity(dates.len());
    let mut outside = 0usize;
    for (row, date) in dates.into_iter().enumerate() {
        if !range.contains(date) {
            outside += 1;
            continue;
        }
        let mut values = [None; DailyVariable::COUNT];
        for (value, column) in values.iter_mut().zip(&columns) {
            *value = column[row];
        }
        records.push(DailyRecord::new(location, date, values));
    }

    if outside > 0 {
        warn!(
            "Dropped {} rows outside {} for {}",
            outside, range, location.name
        );
    }

    Ok(records)
}

fn extract_series(
    series: &Map<String, Value>,
    variable: DailyVariable,
    expected_len: usize,
) -> Result<Vec<Option<f64>>, FetchError> {
    let items = match series.get(variable.api_name()) {
        None | Some(Value::Null) => return Ok(vec![None; expected_len]),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(FetchError::Parse(format!(
                "daily.{variable} is not an array"
            )))
        }
    };

    if items.len() != expected_len {
        return Err(FetchError::Parse(format!(
            "daily.{variable} has {} values but daily.time has {expected_len}",
            items.len()
        )));
    }

    items
        .iter()
        .map(|item| match item {
            Value::Null => Ok(None),
            Value::Number(number) => Ok(number.as_f64()),
            other => Err(FetchError::Parse(format!(
                "daily.{variable} contains a non-numeric value: {other}"
            ))),
        })
        .collect()
}

fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_CHARS).collect()
}
