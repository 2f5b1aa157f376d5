use chrono::{Datelike, NaiveDate};
use flu_utils::dates::{format_date, parse_iso_date, utc_midnight_millis};
use flu_utils::error::InvalidDateError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar day with no time-of-day or timezone attached.
///
/// Every arithmetic operation on a `CalendarDate` is done against UTC
/// midnight, so the same value produces the same season and week offset no
/// matter which timezone the process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from a zero-based month (0 = January, 9 = October).
    pub fn from_ymd0(year: i32, month0: u32, day: u32) -> Result<Self, InvalidDateError> {
        month0
            .checked_add(1)
            .and_then(|month| NaiveDate::from_ymd_opt(year, month, day))
            .map(CalendarDate)
            .ok_or_else(|| InvalidDateError(format!("{year}-{month0}(0-based)-{day}")))
    }

    /// Build a date from a one-based month (1 = January, 10 = October).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, InvalidDateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .ok_or_else(|| InvalidDateError(format!("{year}-{month}-{day}")))
    }

    /// Parse an ISO-8601 date or timestamp. Timestamps resolve to the date of
    /// their UTC instant.
    pub fn parse(s: &str) -> Result<Self, InvalidDateError> {
        parse_iso_date(s).map(CalendarDate)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Zero-based month, 0 = January.
    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Zero-based day of the year, 0 = January 1.
    pub fn ordinal0(&self) -> u32 {
        self.0.ordinal0()
    }

    pub fn naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Milliseconds since the Unix epoch at UTC midnight of this date.
    pub fn utc_millis(&self) -> i64 {
        utc_midnight_millis(&self.0)
    }

    /// The following calendar day, if representable.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(CalendarDate)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        CalendarDate(value)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(value: CalendarDate) -> Self {
        value.0
    }
}

impl FromStr for CalendarDate {
    type Err = InvalidDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CalendarDate::parse(s)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_date(&self.0))
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CalendarDate::parse(&raw).map_err(serde::de::Error::custom)
    }
}
