use crate::archive::request::{ARCHIVE_URL, DEFAULT_TIMEZONE};
use crate::archive::retry::RetryPolicy;
use bon::Builder;
use std::time::Duration;

/// Pause between two consecutive locations.
pub const DEFAULT_COURTESY_DELAY: Duration = Duration::from_secs(8);

/// Tuning of the fetch pipeline.
///
/// All fields have defaults matching the archive's free-tier limits, so
/// `FetchSettings::default()` is what the binary uses unless the config file
/// overrides the timezone.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use weather_harvest::FetchSettings;
///
/// let settings = FetchSettings::builder()
///     .timezone("Europe/Berlin")
///     .courtesy_delay(Duration::from_secs(2))
///     .build();
///
/// assert_eq!(settings.timezone, "Europe/Berlin");
/// assert_eq!(settings.retry_policy.max_attempts(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct FetchSettings {
    /// Archive endpoint queried for every location.
    #[builder(into, default = ARCHIVE_URL.to_string())]
    pub endpoint: String,
    /// Timezone used by the archive to cut days.
    #[builder(into, default = DEFAULT_TIMEZONE.to_string())]
    pub timezone: String,
    /// Wait between two consecutive locations, on top of retry delays.
    #[builder(default = DEFAULT_COURTESY_DELAY)]
    pub courtesy_delay: Duration,
    #[builder(default)]
    pub retry_policy: RetryPolicy,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
