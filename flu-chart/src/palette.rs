//! Colour configuration for dashboard charts.

use flu_season::season::SeasonKey;
use serde::Serialize;

/// d3's Tableau10 categorical scheme.
pub const TABLEAU10: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

pub const FORECAST_COLOR: &str = "#f59e0b";
pub const FORECAST_BAND_FILL: &str = "rgba(245, 158, 11, 0.1)";

const SUBTYPE_COLORS: [(&str, &str); 8] = [
    ("H1N1", "#e41a1c"),
    ("H3N2", "#377eb8"),
    ("H5N1", "#4daf4a"),
    ("H7N9", "#984ea3"),
    ("B/Yamagata", "#ff7f00"),
    ("B/Victoria", "#a65628"),
    ("A (unsubtyped)", "#f781bf"),
    ("B (lineage unknown)", "#999999"),
];
const UNKNOWN_SUBTYPE_COLOR: &str = "#666666";

/// Per-chart season colours. A season's colour depends only on its start
/// year, so it keeps the same colour whichever window of seasons is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonPalette {
    scheme: Vec<String>,
}

impl Default for SeasonPalette {
    fn default() -> Self {
        SeasonPalette {
            scheme: TABLEAU10.iter().map(|color| color.to_string()).collect(),
        }
    }
}

impl SeasonPalette {
    /// `None` for an empty scheme.
    pub fn with_scheme(scheme: Vec<String>) -> Option<Self> {
        if scheme.is_empty() {
            None
        } else {
            Some(SeasonPalette { scheme })
        }
    }

    pub fn color_for(&self, season: &SeasonKey) -> &str {
        let index = season.season_year.rem_euclid(self.scheme.len() as i32) as usize;
        &self.scheme[index]
    }
}

/// Colour of an influenza subtype or lineage; unrecognised names share a
/// neutral grey.
pub fn subtype_color(subtype: &str) -> &'static str {
    SUBTYPE_COLORS
        .iter()
        .find(|(name, _)| *name == subtype)
        .map(|(_, color)| *color)
        .unwrap_or(UNKNOWN_SUBTYPE_COLOR)
}

/// Traffic-light colour for an anomaly severity in `0.0..=1.0`.
pub fn severity_color(severity: f64) -> &'static str {
    if severity >= 0.75 {
        "#ef4444"
    } else if severity >= 0.5 {
        "#f59e0b"
    } else if severity >= 0.25 {
        "#eab308"
    } else {
        "#22c55e"
    }
}
