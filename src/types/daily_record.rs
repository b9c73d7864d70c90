use crate::types::daily_variable::DailyVariable;
use crate::types::location::Location;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One location-day of archived weather, joined with the location it belongs to.
///
/// Field order matches the column order of the exported files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub temperature_2m_max: Option<f64>,          // °C
    pub temperature_2m_min: Option<f64>,          // °C
    pub apparent_temperature_max: Option<f64>,    // °C
    pub apparent_temperature_min: Option<f64>,    // °C
    pub precipitation_sum: Option<f64>,           // mm
    pub rain_sum: Option<f64>,                    // mm
    pub snowfall_sum: Option<f64>,                // cm
    pub precipitation_hours: Option<f64>,         // h
    pub sunshine_duration: Option<f64>,           // s
    pub daylight_duration: Option<f64>,           // s
    pub wind_speed_10m_max: Option<f64>,          // km/h
    pub wind_gusts_10m_max: Option<f64>,          // km/h
    pub wind_direction_10m_dominant: Option<f64>, // °
    pub shortwave_radiation_sum: Option<f64>,     // MJ/m²
    pub et0_fao_evapotranspiration: Option<f64>,  // mm
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub region: Option<String>,
    pub population: Option<u64>,
}

impl DailyRecord {
    /// Builds a record from the variable values, given in [`DailyVariable::ALL`] order.
    pub fn new(
        location: &Location,
        date: NaiveDate,
        values: [Option<f64>; DailyVariable::COUNT],
    ) -> Self {
        let [
            temperature_2m_max,
            temperature_2m_min,
            apparent_temperature_max,
            apparent_temperature_min,
            precipitation_sum,
            rain_sum,
            snowfall_sum,
            precipitation_hours,
            sunshine_duration,
            daylight_duration,
            wind_speed_10m_max,
            wind_gusts_10m_max,
            wind_direction_10m_dominant,
            shortwave_radiation_sum,
            et0_fao_evapotranspiration,
        ] = values;

        Self {
            date,
            temperature_2m_max,
            temperature_2m_min,
            apparent_temperature_max,
            apparent_temperature_min,
            precipitation_sum,
            rain_sum,
            snowfall_sum,
            precipitation_hours,
            sunshine_duration,
            daylight_duration,
            wind_speed_10m_max,
            wind_gusts_10m_max,
            wind_direction_10m_dominant,
            shortwave_radiation_sum,
            et0_fao_evapotranspiration,
            location: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            region: location.region.clone(),
            population: location.population,
        }
    }

    pub fn value(&self, variable: DailyVariable) -> Option<f64> {
        match variable {
            DailyVariable::Temperature2mMax => self.temperature_2m_max,
            DailyVariable::Temperature2mMin => self.temperature_2m_min,
            DailyVariable::ApparentTemperatureMax => self.apparent_temperature_max,
            DailyVariable::ApparentTemperatureMin => self.apparent_temperature_min,
            DailyVariable::PrecipitationSum => self.precipitation_sum,
            DailyVariable::RainSum => self.rain_sum,
            DailyVariable::SnowfallSum => self.snowfall_sum,
            DailyVariable::PrecipitationHours => self.precipitation_hours,
            DailyVariable::SunshineDuration => self.sunshine_duration,
            DailyVariable::DaylightDuration => self.daylight_duration,
            DailyVariable::WindSpeed10mMax => self.wind_speed_10m_max,
            DailyVariable::WindGusts10mMax => self.wind_gusts_10m_max,
            DailyVariable::WindDirection10mDominant => self.wind_direction_10m_dominant,
            DailyVariable::ShortwaveRadiationSum => self.shortwave_radiation_sum,
            DailyVariable::Et0FaoEvapotranspiration => self.et0_fao_evapotranspiration,
        }
    }

    /// Whether this row belongs to `location`.
    pub fn is_for(&self, location: &Location) -> bool {
        self.location == location.name
            && self.latitude == location.latitude
            && self.longitude == location.longitude
            && self.region == location.region
            && self.population == location.population
    }
}
