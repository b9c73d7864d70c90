//! The daily variables requested from the Open-Meteo archive.

use std::fmt;

/// One of the fifteen daily aggregates requested for every location.
///
/// The variant order is the order of the `daily` query parameter and of the
/// variable columns in the exported files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DailyVariable {
    /// Maximum air temperature at 2 m (°C).
    Temperature2mMax,
    /// Minimum air temperature at 2 m (°C).
    Temperature2mMin,
    /// Maximum apparent ("feels like") temperature (°C).
    ApparentTemperatureMax,
    /// Minimum apparent temperature (°C).
    ApparentTemperatureMin,
    /// Sum of rain, showers and snowfall (mm).
    PrecipitationSum,
    /// Sum of rain and showers (mm).
    RainSum,
    /// Sum of snowfall (cm).
    SnowfallSum,
    /// Hours with precipitation.
    PrecipitationHours,
    /// Sunshine duration (s).
    SunshineDuration,
    /// Daylight duration (s).
    DaylightDuration,
    /// Maximum wind speed at 10 m (km/h).
    WindSpeed10mMax,
    /// Maximum wind gusts at 10 m (km/h).
    WindGusts10mMax,
    /// Dominant wind direction at 10 m (°).
    WindDirection10mDominant,
    /// Sum of shortwave radiation (MJ/m²).
    ShortwaveRadiationSum,
    /// FAO-56 reference evapotranspiration (mm).
    Et0FaoEvapotranspiration,
}

impl DailyVariable {
    pub const COUNT: usize = 15;

    pub const ALL: [DailyVariable; Self::COUNT] = [
        DailyVariable::Temperature2mMax,
        DailyVariable::Temperature2mMin,
        DailyVariable::ApparentTemperatureMax,
        DailyVariable::ApparentTemperatureMin,
        DailyVariable::PrecipitationSum,
        DailyVariable::RainSum,
        DailyVariable::SnowfallSum,
        DailyVariable::PrecipitationHours,
        DailyVariable::SunshineDuration,
        DailyVariable::DaylightDuration,
        DailyVariable::WindSpeed10mMax,
        DailyVariable::WindGusts10mMax,
        DailyVariable::WindDirection10mDominant,
        DailyVariable::ShortwaveRadiationSum,
        DailyVariable::Et0FaoEvapotranspiration,
    ];

    /// The field name used by the archive API and in the exported files.
    pub fn api_name(&self) -> &'static str {
        match self {
            DailyVariable::Temperature2mMax => "temperature_2m_max",
            DailyVariable::Temperature2mMin => "temperature_2m_min",
            DailyVariable::ApparentTemperatureMax => "apparent_temperature_max",
            DailyVariable::ApparentTemperatureMin => "apparent_temperature_min",
            DailyVariable::PrecipitationSum => "precipitation_sum",
            DailyVariable::RainSum => "rain_sum",
            DailyVariable::SnowfallSum => "snowfall_sum",
            DailyVariable::PrecipitationHours => "precipitation_hours",
            DailyVariable::SunshineDuration => "sunshine_duration",
            DailyVariable::DaylightDuration => "daylight_duration",
            DailyVariable::WindSpeed10mMax => "wind_speed_10m_max",
            DailyVariable::WindGusts10mMax => "wind_gusts_10m_max",
            DailyVariable::WindDirection10mDominant => "wind_direction_10m_dominant",
            DailyVariable::ShortwaveRadiationSum => "shortwave_radiation_sum",
            DailyVariable::Et0FaoEvapotranspiration => "et0_fao_evapotranspiration",
        }
    }

    /// Comma-joined list of all variables, as sent in the `daily` parameter.
    pub(crate) fn query_list() -> String {
        Self::ALL
            .iter()
            .map(DailyVariable::api_name)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Formats a `DailyVariable` using its API name.
///
/// # Examples
///
/// ```
/// use weather_harvest::DailyVariable;
///
/// assert_eq!(DailyVariable::RainSum.to_string(), "rain_sum");
/// ```
impl fmt::Display for DailyVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}
