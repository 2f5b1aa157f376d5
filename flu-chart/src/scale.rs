use flu_season::points::{ForecastPoint, SeasonedPoint};
use log::debug;
use serde::{Deserialize, Serialize};

/// Vertical extent shared by the historical seasons and the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScale {
    pub y_max: f64,
    /// The forecast's upper confidence bound rises above `y_max`, so the
    /// band is cut off and a truncation marker must be drawn.
    pub ci_clipped: bool,
}

/// Compute the shared y-axis maximum and whether the confidence band is
/// clipped by it.
///
/// The maximum is the larger of the historical peak (1 when there is no
/// data or every count is 0) and the forecast peak. Upper bounds never
/// stretch the axis; they are only compared against it.
pub fn unify_scale(historical: &[SeasonedPoint], forecast: &[ForecastPoint]) -> ChartScale {
    let historical_max = max_or(historical.iter().map(|point| point.cases), 1.0);
    let forecast_max = max_or(forecast.iter().map(|point| point.forecast), 0.0);
    let y_max = historical_max.max(forecast_max);

    let ci_upper_max = max_or(forecast.iter().map(|point| point.upper), 0.0);
    let ci_clipped = !forecast.is_empty() && ci_upper_max > y_max;
    if ci_clipped {
        debug!("scale: CI upper {} exceeds y max {}", ci_upper_max, y_max);
    }

    ChartScale { y_max, ci_clipped }
}

/// Largest finite value, or `default` when there is none or it is 0.
fn max_or(values: impl Iterator<Item = f64>, default: f64) -> f64 {
    let max = values
        .filter(|value| value.is_finite())
        .fold(None, |acc: Option<f64>, value| {
            Some(acc.map_or(value, |current| current.max(value)))
        });
    match max {
        Some(value) if value != 0.0 => value,
        _ => default,
    }
}
