use flu_season::points::ForecastPoint;
use flu_season::records::RawForecastRecord;
use flu_season::season::in_display_domain;
use log::debug;
use serde::{Deserialize, Serialize};

/// Project raw forecast records onto the season week axis.
///
/// Missing numbers count as 0. Weeks outside `0..=52` are dropped and the
/// rest sorted ascending. No records, or none in view, gives an empty
/// projection: a chart without a forecast is a normal state.
pub fn project_forecast(records: &[RawForecastRecord]) -> Vec<ForecastPoint> {
    let mut points: Vec<ForecastPoint> = records
        .iter()
        .map(ForecastPoint::from)
        .filter(|point| in_display_domain(point.week_offset))
        .collect();
    points.sort_by_key(|point| point.week_offset);
    debug!(
        "forecast: {} records -> {} points in view",
        records.len(),
        points.len()
    );
    points
}

/// Mean and standard deviation of the seasonal baseline the forecast model
/// was fitted against, shown next to the chart title.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianBaseline {
    pub mean: f64,
    pub stddev: f64,
}

impl GaussianBaseline {
    /// Read from the first forecast record; present only if both values
    /// are finite numbers.
    pub fn from_records(records: &[RawForecastRecord]) -> Option<Self> {
        let first = records.first()?;
        match (first.gaussian_mean, first.gaussian_stddev) {
            (Some(mean), Some(stddev)) if mean.is_finite() && stddev.is_finite() => {
                Some(GaussianBaseline { mean, stddev })
            }
            _ => None,
        }
    }

    /// `"μ 75.3 σ 9.5"`
    pub fn label(&self) -> String {
        format!("\u{3bc} {:.1} \u{3c3} {:.1}", self.mean, self.stddev)
    }
}
