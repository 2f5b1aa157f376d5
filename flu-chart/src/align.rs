use flu_season::points::SeasonedPoint;
use flu_season::season::{in_display_domain, SeasonKey};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of seasons overlaid on one chart.
pub const DEFAULT_MAX_SEASONS: usize = 10;

/// The plottable points of one season, sorted by week offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSeries {
    pub season: SeasonKey,
    pub points: Vec<SeasonedPoint>,
    /// Set on the latest season only; drawn with more emphasis.
    pub is_current: bool,
}

/// Retained seasons, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries(pub Vec<SeasonSeries>);

impl AlignedSeries {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeasonSeries> {
        self.0.iter()
    }

    pub fn current(&self) -> Option<&SeasonSeries> {
        self.0.iter().find(|series| series.is_current)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|series| series.season.label.as_str()).collect()
    }

    /// Every retained point across all seasons.
    pub fn points(&self) -> impl Iterator<Item = &SeasonedPoint> {
        self.0.iter().flat_map(|series| series.points.iter())
    }
}

/// Group points by season and keep the `max_seasons` most recent ones.
///
/// Older seasons are discarded before filtering. Within a kept season only
/// week offsets in `0..=52` survive, sorted ascending (ties keep input
/// order). A season left with no points is not emitted, and the last emitted
/// season is marked current.
pub fn align_series(points: &[SeasonedPoint], max_seasons: usize) -> AlignedSeries {
    let mut by_season: BTreeMap<&SeasonKey, Vec<&SeasonedPoint>> = BTreeMap::new();
    for point in points {
        by_season.entry(&point.season).or_default().push(point);
    }

    let skipped = by_season.len().saturating_sub(max_seasons);
    if skipped > 0 {
        debug!("align: dropping {} older seasons", skipped);
    }

    let mut series: Vec<SeasonSeries> = by_season
        .into_iter()
        .skip(skipped)
        .filter_map(|(season, season_points)| {
            let mut in_view: Vec<SeasonedPoint> = season_points
                .into_iter()
                .filter(|point| in_display_domain(point.week_offset))
                .cloned()
                .collect();
            if in_view.is_empty() {
                debug!("align: season {} has no points in view", season.label);
                return None;
            }
            in_view.sort_by_key(|point| point.week_offset);
            Some(SeasonSeries {
                season: season.clone(),
                points: in_view,
                is_current: false,
            })
        })
        .collect();

    if let Some(latest) = series.last_mut() {
        latest.is_current = true;
    }

    debug!("align: {} points -> {} seasons", points.len(), series.len());
    AlignedSeries(series)
}
