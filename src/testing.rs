//! Shared fixtures for unit tests: a scripted archive transport and
//! generators for archive response bodies.

use crate::archive::request::ArchiveRequest;
use crate::archive::transport::{ArchiveReply, ArchiveTransport, TransportError};
use crate::types::daily_variable::DailyVariable;
use crate::types::date_range::DateRange;
use crate::types::location::Location;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use reqwest::StatusCode;
use serde_json::{json, Map, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

pub(crate) enum Scripted {
    Reply(StatusCode, String),
    Timeout,
    Refused,
}

pub(crate) fn ok(body: String) -> Scripted {
    Scripted::Reply(StatusCode::OK, body)
}

pub(crate) fn rate_limited() -> Scripted {
    Scripted::Reply(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"error": true, "reason": "Too many concurrent requests"}"#.to_string(),
    )
}

pub(crate) fn server_error() -> Scripted {
    Scripted::Reply(StatusCode::INTERNAL_SERVER_ERROR, String::new())
}

pub(crate) fn empty_reply() -> Scripted {
    Scripted::Reply(StatusCode::OK, "   ".to_string())
}

pub(crate) fn timeout() -> Scripted {
    Scripted::Timeout
}

pub(crate) fn refused() -> Scripted {
    Scripted::Refused
}

struct RecordedCall {
    latitude: String,
    timeout: Duration,
}

/// Replays a fixed sequence of replies, one per request, and records what
/// was asked. Running out of script behaves like a refused connection.
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub(crate) fn new(steps: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(steps.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn timeouts(&self) -> Vec<Duration> {
        self.calls.lock().unwrap().iter().map(|c| c.timeout).collect()
    }

    pub(crate) fn latitudes(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.latitude.clone())
            .collect()
    }
}

#[async_trait]
impl ArchiveTransport for ScriptedTransport {
    async fn get(
        &self,
        request: &ArchiveRequest,
        timeout: Duration,
    ) -> Result<ArchiveReply, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            latitude: request.param("latitude").unwrap_or_default().to_string(),
            timeout,
        });
        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Scripted::Reply(status, body)) => Ok(ArchiveReply { status, body }),
            Some(Scripted::Timeout) => Err(TransportError::Timeout),
            Some(Scripted::Refused) | None => {
                Err(TransportError::Network("connection refused".into()))
            }
        }
    }
}

/// 2023-08-28 to 2025-08-26, the window of a run on 2025-08-27.
pub(crate) fn test_range() -> DateRange {
    DateRange::last_two_years(NaiveDate::from_ymd_opt(2025, 8, 27).unwrap()).unwrap()
}

pub(crate) fn test_location(name: &str, latitude: f64, longitude: f64) -> Location {
    Location::builder()
        .name(name)
        .latitude(latitude)
        .longitude(longitude)
        .build()
}

/// An archive body with `days` consecutive days from `start`.
///
/// `temperature_2m_max` is `20 + day`, `temperature_2m_min` is `10 + day`,
/// and `precipitation_sum` is null on every third day and `day` otherwise.
/// The other variables are `0.5`.
pub(crate) fn daily_body(start: NaiveDate, days: usize) -> String {
    let time: Vec<String> = (0..days)
        .map(|day| (start + Days::new(day as u64)).format("%Y-%m-%d").to_string())
        .collect();

    let mut daily = Map::new();
    daily.insert("time".to_string(), json!(time));
    for variable in DailyVariable::ALL {
        let values: Vec<Value> = (0..days)
            .map(|day| match variable {
                DailyVariable::Temperature2mMax => json!(20.0 + day as f64),
                DailyVariable::Temperature2mMin => json!(10.0 + day as f64),
                DailyVariable::PrecipitationSum if day % 3 == 2 => Value::Null,
                DailyVariable::PrecipitationSum => json!(day as f64),
                _ => json!(0.5),
            })
            .collect();
        daily.insert(variable.api_name().to_string(), Value::Array(values));
    }

    json!({
        "latitude": 39.9,
        "longitude": 32.9,
        "timezone": "Europe/Istanbul",
        "daily_units": { "time": "iso8601" },
        "daily": Value::Object(daily),
    })
    .to_string()
}
