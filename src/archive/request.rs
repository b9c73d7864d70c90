use crate::types::daily_variable::DailyVariable;
use crate::types::date_range::DateRange;
use crate::types::location::Location;

/// Open-Meteo historical weather endpoint.
pub const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Timezone in which the archive aggregates days.
pub const DEFAULT_TIMEZONE: &str = "Europe/Istanbul";

/// The query sent for one location.
///
/// Every location in a run shares the same variables, dates and timezone;
/// only the coordinates differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
    endpoint: String,
    query: Vec<(&'static str, String)>,
}

impl ArchiveRequest {
    pub fn new(endpoint: &str, location: &Location, range: &DateRange, timezone: &str) -> Self {
        let query = vec![
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("start_date", range.start.format("%Y-%m-%d").to_string()),
            ("end_date", range.end.format("%Y-%m-%d").to_string()),
            ("daily", DailyVariable::query_list()),
            ("timezone", timezone.to_string()),
        ];
        Self {
            endpoint: endpoint.to_string(),
            query,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_query_parameters() {
        let location = Location::builder()
            .name("Antalya")
            .latitude(36.8969)
            .longitude(30.7133)
            .build();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2023, 8, 27).unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 26).unwrap(),
        )
        .unwrap();

        let request = ArchiveRequest::new(ARCHIVE_URL, &location, &range, DEFAULT_TIMEZONE);

        assert_eq!(request.endpoint(), ARCHIVE_URL);
        assert_eq!(request.param("latitude"), Some("36.8969"));
        assert_eq!(request.param("longitude"), Some("30.7133"));
        assert_eq!(request.param("start_date"), Some("2023-08-27"));
        assert_eq!(request.param("end_date"), Some("2025-08-26"));
        assert_eq!(request.param("timezone"), Some("Europe/Istanbul"));
        assert_eq!(
            request.param("daily").map(|d| d.split(',').count()),
            Some(DailyVariable::COUNT)
        );
        assert_eq!(request.query().len(), 6);
    }
}
