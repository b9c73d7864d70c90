//! Defines the geographic locations whose daily weather history is harvested.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// A named geographic point for which daily weather history is fetched.
///
/// Locations are loaded once from the configuration file and never change
/// during a run. The `name` is the identity of a location: the location
/// source rejects two entries with the same name.
///
/// The config file may spell the coordinates as `lat`/`lon`; both spellings
/// deserialize into the same fields.
///
/// # Examples
///
/// ```
/// use weather_harvest::Location;
///
/// let istanbul = Location::builder()
///     .name("Istanbul")
///     .latitude(41.0082)
///     .longitude(28.9784)
///     .region("Marmara")
///     .population(15_462_452)
///     .build();
///
/// assert_eq!(istanbul.name, "Istanbul");
/// assert_eq!(istanbul.region.as_deref(), Some("Marmara"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct Location {
    /// Display name of the location, also its identity (e.g. "Ankara").
    #[builder(into)]
    pub name: String,
    /// Latitude in decimal degrees (positive for North, negative for South).
    #[serde(alias = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees (positive for East, negative for West).
    #[serde(alias = "lon")]
    pub longitude: f64,
    /// Administrative or geographic region, if configured.
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Number of inhabitants, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
}

impl Location {
    /// Returns `true` when both coordinates are finite and inside the valid
    /// latitude/longitude ranges.
    pub fn has_valid_coordinates(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_short_coordinate_keys() -> Result<(), serde_json::Error> {
        let location: Location =
            serde_json::from_str(r#"{"name": "Izmir", "lat": 38.4237, "lon": 27.1428}"#)?;

        assert_eq!(location.latitude, 38.4237);
        assert_eq!(location.longitude, 27.1428);
        assert_eq!(location.region, None);
        assert_eq!(location.population, None);
        Ok(())
    }

    #[test]
    fn test_deserialize_full_entry() -> Result<(), serde_json::Error> {
        let location: Location = serde_json::from_str(
            r#"{"name": "Ankara", "latitude": 39.9334, "longitude": 32.8597,
                "region": "Central Anatolia", "population": 5663322}"#,
        )?;

        assert_eq!(location.region.as_deref(), Some("Central Anatolia"));
        assert_eq!(location.population, Some(5_663_322));
        Ok(())
    }

    #[test]
    fn test_coordinate_validation() {
        let mut location = Location::builder()
            .name("Nowhere")
            .latitude(91.0)
            .longitude(10.0)
            .build();
        assert!(!location.has_valid_coordinates());

        location.latitude = -90.0;
        location.longitude = 180.0;
        assert!(location.has_valid_coordinates());

        location.longitude = f64::NAN;
        assert!(!location.has_valid_coordinates());
    }
}
