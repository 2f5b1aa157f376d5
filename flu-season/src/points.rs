//! Plot-ready points on the shared season week axis.

use crate::records::{HistoricalRecord, RawForecastRecord};
use crate::season::{index_season, SeasonKey, WeekOffset};
use serde::{Deserialize, Serialize};

/// One historical observation placed on its season's week axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonedPoint {
    pub season: SeasonKey,
    pub week_offset: WeekOffset,
    pub cases: f64,
}

/// One forecast week with its confidence band. Bounds missing from the
/// source record are 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub week_offset: WeekOffset,
    pub forecast: f64,
    pub lower: f64,
    pub upper: f64,
}

impl From<&HistoricalRecord> for SeasonedPoint {
    fn from(record: &HistoricalRecord) -> Self {
        let (season, week_offset) = index_season(&record.date);
        SeasonedPoint {
            season,
            week_offset,
            cases: record.cases,
        }
    }
}

impl From<&RawForecastRecord> for ForecastPoint {
    fn from(record: &RawForecastRecord) -> Self {
        let (_, week_offset) = index_season(&record.date);
        ForecastPoint {
            week_offset,
            forecast: record.forecast.unwrap_or(0.0),
            lower: record.lower.unwrap_or(0.0),
            upper: record.upper.unwrap_or(0.0),
        }
    }
}

/// Index every historical record.
pub fn seasoned_points(records: &[HistoricalRecord]) -> Vec<SeasonedPoint> {
    records.iter().map(SeasonedPoint::from).collect()
}
