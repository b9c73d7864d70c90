use crate::locations::error::LocationSourceError;
use crate::types::location::Location;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io;
use std::path::Path;

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "cities_config.json";

/// Contents of the config file.
///
/// ```json
/// {
///   "timezone": "Europe/Istanbul",
///   "locations": [
///     { "name": "Istanbul", "lat": 41.0082, "lon": 28.9784, "region": "Marmara" }
///   ]
/// }
/// ```
///
/// `turkish_cities` is accepted in place of `locations`, and `timezone` may be
/// left out to use the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(alias = "turkish_cities")]
    pub locations: Vec<Location>,
}

impl LocationConfig {
    /// Reads and validates the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LocationSourceError::Missing`] if the file does not exist and
    /// [`LocationSourceError::Read`] if it cannot be read. See
    /// [`LocationConfig::from_json`] for content errors.
    pub async fn load(path: &Path) -> Result<Self, LocationSourceError> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LocationSourceError::Missing(path.to_path_buf()))
            }
            Err(e) => return Err(LocationSourceError::Read(path.to_path_buf(), e)),
        };
        Self::from_json(&contents, path)
    }

    /// Parses and validates config contents. `origin` is only used in errors.
    ///
    /// # Errors
    ///
    /// * [`LocationSourceError::Parse`] for invalid JSON or missing fields.
    /// * [`LocationSourceError::Empty`] when no location is listed.
    /// * [`LocationSourceError::DuplicateName`] when two locations share a name.
    /// * [`LocationSourceError::InvalidCoordinates`] for out-of-range coordinates.
    pub fn from_json(contents: &str, origin: &Path) -> Result<Self, LocationSourceError> {
        let config: Self = serde_json::from_str(contents)
            .map_err(|e| LocationSourceError::Parse(origin.to_path_buf(), e))?;
        config.validate(origin)?;
        Ok(config)
    }

    fn validate(&self, origin: &Path) -> Result<(), LocationSourceError> {
        if self.locations.is_empty() {
            return Err(LocationSourceError::Empty(origin.to_path_buf()));
        }

        let mut seen = HashSet::with_capacity(self.locations.len());
        for location in &self.locations {
            if !location.has_valid_coordinates() {
                return Err(LocationSourceError::InvalidCoordinates {
                    name: location.name.clone(),
                    latitude: location.latitude,
                    longitude: location.longitude,
                });
            }
            if !seen.insert(location.name.as_str()) {
                return Err(LocationSourceError::DuplicateName {
                    path: origin.to_path_buf(),
                    name: location.name.clone(),
                });
            }
        }
        Ok(())
    }
}
