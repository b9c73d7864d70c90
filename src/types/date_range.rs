//! The historical window requested from the archive.

use chrono::{Days, NaiveDate};
use std::fmt;

/// Number of calendar days in the harvested history (two years).
pub const HISTORY_DAYS: u64 = 730;

/// An inclusive range of calendar days.
///
/// The harvester uses a single range for the whole run, computed once from
/// the current date with [`DateRange::last_two_years`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    /// First day of the range (inclusive).
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, returning `None` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// The `days` calendar days ending yesterday, relative to `today`.
    ///
    /// Returns `None` for `days == 0` or when the dates fall outside chrono's
    /// representable range.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use weather_harvest::DateRange;
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 8, 27).unwrap();
    /// let range = DateRange::trailing(today, 7).unwrap();
    ///
    /// assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 8, 20).unwrap());
    /// assert_eq!(range.end, NaiveDate::from_ymd_opt(2025, 8, 26).unwrap());
    /// assert_eq!(range.num_days(), 7);
    /// ```
    pub fn trailing(today: NaiveDate, days: u64) -> Option<Self> {
        let end = today.pred_opt()?;
        let start = end.checked_sub_days(Days::new(days.checked_sub(1)?))?;
        Self::new(start, end)
    }

    /// The two-year window `[today - 730 days, today - 1 day]`.
    pub fn last_two_years(today: NaiveDate) -> Option<Self> {
        Self::trailing(today, HISTORY_DAYS)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range, both ends included.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
