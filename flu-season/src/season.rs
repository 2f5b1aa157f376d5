//! Flu season indexing.
//!
//! A surveillance season runs from October 1 through September 30 and is
//! labelled by the year it starts in, so October 2023 through September 2024
//! is the `"2023/2024"` season. Dates are placed on a shared week axis by
//! counting whole 7-day periods since the season's October 1 anchor, which
//! lets several seasons be overlaid on the same chart.

use crate::calendar_date::CalendarDate;
use flu_utils::dates::DAY_MILLIS;
use flu_utils::error::InvalidDateError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Zero-based month in which every season starts (October).
pub const SEASON_START_MONTH0: u32 = 9;

/// Milliseconds in one week.
pub const WEEK_MILLIS: i64 = 7 * DAY_MILLIS;

/// Week offsets that are drawn. Anything outside is dropped, never clamped.
pub const WEEK_OFFSET_DOMAIN: RangeInclusive<WeekOffset> = 0..=52;

/// Whole weeks elapsed since a season's October 1 anchor.
pub type WeekOffset = i32;

/// Days from October 1 to the first of October, November and December.
const DAYS_BEFORE_MONTH_IN_FALL: [u32; 3] = [0, 31, 61];

/// October 1 through December 31.
const DAYS_OCT_THROUGH_DEC: u32 = 92;

/// Identifies one season by its starting year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeasonKey {
    pub season_year: i32,
    pub label: String,
}

impl SeasonKey {
    pub fn new(season_year: i32) -> Self {
        SeasonKey {
            season_year,
            label: season_label(season_year),
        }
    }

    /// The season a date falls in: October onwards starts a new season,
    /// January through September belong to the one that began the previous
    /// October.
    pub fn for_date(date: &CalendarDate) -> Self {
        let season_year = if date.month0() >= SEASON_START_MONTH0 {
            date.year()
        } else {
            date.year() - 1
        };
        SeasonKey::new(season_year)
    }

    /// October 1 of the season's starting year.
    pub fn anchor(&self) -> Result<CalendarDate, InvalidDateError> {
        CalendarDate::from_ymd0(self.season_year, SEASON_START_MONTH0, 1)
    }
}

/// `"{year}/{year + 1}"`
pub fn season_label(season_year: i32) -> String {
    format!("{}/{}", season_year, season_year + 1)
}

/// Place a date on its season's week axis.
///
/// The season is chosen first and the offset is always measured against
/// that season's own anchor, so the result lies in `0..=52`.
pub fn index_season(date: &CalendarDate) -> (SeasonKey, WeekOffset) {
    let season = SeasonKey::for_date(date);
    let week_offset = (days_since_anchor(date) / 7) as WeekOffset;
    (season, week_offset)
}

/// `floor((date_ms - anchor_ms) / WEEK_MILLIS)` on UTC midnight timestamps.
/// Negative when `date` precedes `anchor`.
pub fn week_offset_between(date: &CalendarDate, anchor: &CalendarDate) -> WeekOffset {
    (date.utc_millis() - anchor.utc_millis()).div_euclid(WEEK_MILLIS) as WeekOffset
}

pub fn in_display_domain(week_offset: WeekOffset) -> bool {
    WEEK_OFFSET_DOMAIN.contains(&week_offset)
}

// Both ends sit on UTC midnight, so the day count times DAY_MILLIS is exactly
// the millisecond difference used by `week_offset_between`.
fn days_since_anchor(date: &CalendarDate) -> u32 {
    let month0 = date.month0();
    if month0 >= SEASON_START_MONTH0 {
        DAYS_BEFORE_MONTH_IN_FALL[(month0 - SEASON_START_MONTH0) as usize] + date.day() - 1
    } else {
        DAYS_OCT_THROUGH_DEC + date.ordinal0()
    }
}
