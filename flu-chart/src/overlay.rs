//! The full season comparison chart model.
//!
//! `build_overlay` runs the whole pipeline for one snapshot of fetched data:
//! records are indexed onto the season week axis, the latest seasons are
//! aligned, the forecast is projected, and a shared scale is computed from
//! the points that end up in view. The result carries every coordinate,
//! label and style a renderer needs, so drawing needs no further logic.

use crate::align::{align_series, SeasonSeries, DEFAULT_MAX_SEASONS};
use crate::forecast::{project_forecast, GaussianBaseline};
use crate::layout::{case_ticks, week_ticks, ChartLayout, Tick};
use crate::palette::{SeasonPalette, FORECAST_BAND_FILL, FORECAST_COLOR};
use crate::scale::{unify_scale, ChartScale};
use flu_season::country::CountryFilter;
use flu_season::points::{seasoned_points, ForecastPoint, SeasonedPoint};
use flu_season::records::{HistoricalRecord, RawForecastRecord};
use log::debug;
use serde::{Deserialize, Serialize};

pub const CHART_TITLE: &str = "Season Comparison";
pub const CI_CLIP_LABEL: &str = "\u{2191} CI extends beyond chart";
pub const FORECAST_LEGEND_LABEL: &str = "Forecast";

/// Per-chart settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayConfig {
    pub max_seasons: usize,
    pub layout: ChartLayout,
    pub palette: SeasonPalette,
    pub x_tick_count: usize,
    pub y_tick_count: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            max_seasons: DEFAULT_MAX_SEASONS,
            layout: ChartLayout::default(),
            palette: SeasonPalette::default(),
            x_tick_count: 10,
            y_tick_count: 4,
        }
    }
}

/// Everything fetched for one render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlaySnapshot {
    pub historical: Vec<HistoricalRecord>,
    /// `None` when no forecast was requested.
    #[serde(default)]
    pub forecast: Option<Vec<RawForecastRecord>>,
    #[serde(default)]
    pub country: CountryFilter,
    /// The forecast request failed; any forecast records are ignored and the
    /// chart shows a "forecast unavailable" badge instead.
    #[serde(default)]
    pub forecast_unavailable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStyle {
    pub color: String,
    pub stroke_width: f64,
    pub opacity: f64,
    pub dash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonTrace {
    pub series: SeasonSeries,
    pub style: TraceStyle,
    pub legend: LegendEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastTrace {
    pub points: Vec<ForecastPoint>,
    pub style: TraceStyle,
    pub band_fill: String,
    pub legend: LegendEntry,
}

/// Dashed marker along the top of the plot area, drawn when the confidence
/// band is cut off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipIndicator {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonOverlay {
    pub title: String,
    pub subtitle: String,
    pub layout: ChartLayout,
    pub seasons: Vec<SeasonTrace>,
    pub forecast: Option<ForecastTrace>,
    pub scale: ChartScale,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub clip_indicator: Option<ClipIndicator>,
    pub gaussian_baseline: Option<GaussianBaseline>,
    pub forecast_unavailable: bool,
}

impl SeasonOverlay {
    /// Nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty() && self.forecast.is_none()
    }

    pub fn current_season(&self) -> Option<&SeasonTrace> {
        self.seasons.iter().find(|trace| trace.series.is_current)
    }
}

/// Build the chart model for one snapshot.
pub fn build_overlay(snapshot: &OverlaySnapshot, config: &OverlayConfig) -> SeasonOverlay {
    let layout = config.layout;

    let points = seasoned_points(&snapshot.historical);
    let aligned = align_series(&points, config.max_seasons);

    let raw_forecast: &[RawForecastRecord] = if snapshot.forecast_unavailable {
        &[]
    } else {
        snapshot.forecast.as_deref().unwrap_or(&[])
    };
    let forecast_points = project_forecast(raw_forecast);

    let in_view: Vec<SeasonedPoint> = aligned.points().cloned().collect();
    let scale = unify_scale(&in_view, &forecast_points);

    let x_scale = layout.x_scale();
    let y_scale = layout.y_scale(scale.y_max);

    let seasons: Vec<SeasonTrace> = aligned
        .0
        .into_iter()
        .enumerate()
        .map(|(row, series)| season_trace(series, row, &layout, &config.palette))
        .collect();

    let forecast = if forecast_points.is_empty() {
        None
    } else {
        Some(forecast_trace(forecast_points, seasons.len(), &layout))
    };

    let clip_indicator = if scale.ci_clipped {
        Some(ClipIndicator {
            x1: layout.margin.left,
            x2: layout.width - layout.margin.right,
            y: layout.margin.top,
            label: CI_CLIP_LABEL.to_string(),
        })
    } else {
        None
    };

    debug!(
        "overlay: {} seasons, forecast {}, y_max {}, ci_clipped {}",
        seasons.len(),
        forecast.as_ref().map_or(0, |trace| trace.points.len()),
        scale.y_max,
        scale.ci_clipped
    );

    SeasonOverlay {
        title: CHART_TITLE.to_string(),
        subtitle: snapshot.country.subtitle(),
        layout,
        seasons,
        forecast,
        scale,
        x_ticks: week_ticks(&x_scale, config.x_tick_count),
        y_ticks: case_ticks(&y_scale, config.y_tick_count),
        clip_indicator,
        gaussian_baseline: GaussianBaseline::from_records(raw_forecast),
        forecast_unavailable: snapshot.forecast_unavailable,
    }
}

fn season_trace(
    series: SeasonSeries,
    row: usize,
    layout: &ChartLayout,
    palette: &SeasonPalette,
) -> SeasonTrace {
    let color = palette.color_for(&series.season).to_string();
    let (stroke_width, opacity, legend_opacity) = if series.is_current {
        (2.5, 1.0, 1.0)
    } else {
        (1.0, 0.4, 0.6)
    };
    SeasonTrace {
        legend: LegendEntry {
            label: series.season.label.clone(),
            x: layout.legend_x(),
            y: layout.legend_y(row),
            color: color.clone(),
            opacity: legend_opacity,
        },
        style: TraceStyle {
            color,
            stroke_width,
            opacity,
            dash: None,
        },
        series,
    }
}

fn forecast_trace(points: Vec<ForecastPoint>, row: usize, layout: &ChartLayout) -> ForecastTrace {
    ForecastTrace {
        points,
        style: TraceStyle {
            color: FORECAST_COLOR.to_string(),
            stroke_width: 2.0,
            opacity: 1.0,
            dash: Some("6,3".to_string()),
        },
        band_fill: FORECAST_BAND_FILL.to_string(),
        legend: LegendEntry {
            label: FORECAST_LEGEND_LABEL.to_string(),
            x: layout.legend_x(),
            y: layout.legend_y(row),
            color: FORECAST_COLOR.to_string(),
            opacity: 1.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flu_season::calendar_date::CalendarDate;

    fn historical(rows: &[(&str, f64)]) -> Vec<HistoricalRecord> {
        rows.iter()
            .map(|(date, cases)| HistoricalRecord {
                date: CalendarDate::parse(date).unwrap(),
                cases: *cases,
            })
            .collect()
    }

    fn forecast_record(date: &str, forecast: f64, lower: f64, upper: f64) -> RawForecastRecord {
        RawForecastRecord {
            date: CalendarDate::parse(date).unwrap(),
            forecast: Some(forecast),
            lower: Some(lower),
            upper: Some(upper),
            gaussian_mean: Some(40.0),
            gaussian_stddev: Some(6.3),
        }
    }

    fn sample_snapshot() -> OverlaySnapshot {
        OverlaySnapshot {
            historical: historical(&[
                ("2021-10-03", 5.0),
                ("2021-11-07", 9.0),
                ("2022-10-02", 4.0),
                ("2022-12-04", 10.0),
                ("2023-10-01", 3.0),
                ("2023-10-15", 6.0),
            ]),
            forecast: Some(vec![
                forecast_record("2023-10-29", 8.0, 5.0, 15.0),
                forecast_record("2023-10-22", 7.0, 4.0, 9.0),
            ]),
            country: CountryFilter::new(Some("US")),
            forecast_unavailable: false,
        }
    }

    // ───────────────────── pipeline ─────────────────────

    #[test]
    fn test_overlay_pipeline() {
        let overlay = build_overlay(&sample_snapshot(), &OverlayConfig::default());

        assert_eq!(overlay.title, "Season Comparison");
        assert_eq!(overlay.subtitle, "(US)");
        assert_eq!(overlay.seasons.len(), 3);
        assert_eq!(
            overlay.current_season().unwrap().series.season.label,
            "2023/2024"
        );

        let forecast = overlay.forecast.as_ref().unwrap();
        let offsets: Vec<_> = forecast.points.iter().map(|p| p.week_offset).collect();
        assert_eq!(offsets, [3, 4]);

        // Upper bound 15 does not stretch the axis past the historical 10
        assert_eq!(overlay.scale.y_max, 10.0);
        assert!(overlay.scale.ci_clipped);
        let indicator = overlay.clip_indicator.as_ref().unwrap();
        assert_eq!(indicator.y, 16.0);
        assert_eq!(indicator.label, CI_CLIP_LABEL);

        assert_eq!(overlay.gaussian_baseline.unwrap().label(), "\u{3bc} 40.0 \u{3c3} 6.3");
        assert!(!overlay.is_empty());
    }

    #[test]
    fn test_season_styles_and_legend() {
        let overlay = build_overlay(&sample_snapshot(), &OverlayConfig::default());

        let widths: Vec<_> = overlay.seasons.iter().map(|t| t.style.stroke_width).collect();
        assert_eq!(widths, [1.0, 1.0, 2.5]);
        let legend_y: Vec<_> = overlay.seasons.iter().map(|t| t.legend.y).collect();
        assert_eq!(legend_y, [16.0, 28.0, 40.0]);
        assert_eq!(overlay.seasons[0].legend.opacity, 0.6);
        assert_eq!(overlay.seasons[2].style.opacity, 1.0);

        let forecast = overlay.forecast.as_ref().unwrap();
        assert_eq!(forecast.legend.y, 52.0);
        assert_eq!(forecast.style.dash.as_deref(), Some("6,3"));
        assert_eq!(forecast.style.color, FORECAST_COLOR);
    }

    #[test]
    fn test_axis_ticks() {
        let overlay = build_overlay(&sample_snapshot(), &OverlayConfig::default());
        assert_eq!(overlay.x_ticks.len(), 11);
        assert_eq!(overlay.x_ticks[1].label, "W5");
        let y_labels: Vec<_> = overlay.y_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(y_labels, ["0.0", "2.0", "4.0", "6.0", "8.0", "10"]);
        assert_eq!(overlay.y_ticks.last().unwrap().position, 16.0);
    }

    #[test]
    fn test_max_seasons_config() {
        let config = OverlayConfig {
            max_seasons: 1,
            ..OverlayConfig::default()
        };
        let overlay = build_overlay(&sample_snapshot(), &config);
        assert_eq!(overlay.seasons.len(), 1);
        // Only the 2023 season is in view: history peaks at 6, forecast at 8
        assert_eq!(overlay.scale.y_max, 8.0);
        assert!(overlay.scale.ci_clipped);
    }

    // ───────────────────── forecast states ─────────────────────

    #[test]
    fn test_no_forecast() {
        let snapshot = OverlaySnapshot {
            forecast: None,
            ..sample_snapshot()
        };
        let overlay = build_overlay(&snapshot, &OverlayConfig::default());
        assert!(overlay.forecast.is_none());
        assert!(!overlay.scale.ci_clipped);
        assert!(overlay.clip_indicator.is_none());
        assert!(overlay.gaussian_baseline.is_none());
    }

    #[test]
    fn test_forecast_unavailable_ignores_records() {
        let snapshot = OverlaySnapshot {
            forecast_unavailable: true,
            ..sample_snapshot()
        };
        let overlay = build_overlay(&snapshot, &OverlayConfig::default());
        assert!(overlay.forecast_unavailable);
        assert!(overlay.forecast.is_none());
        assert!(overlay.clip_indicator.is_none());
    }

    #[test]
    fn test_empty_snapshot() {
        let overlay = build_overlay(&OverlaySnapshot::default(), &OverlayConfig::default());
        assert!(overlay.is_empty());
        assert_eq!(overlay.subtitle, "(Global)");
        assert_eq!(overlay.scale.y_max, 1.0);
        assert!(!overlay.scale.ci_clipped);
    }

    #[test]
    fn test_snapshot_from_json() {
        let body = r#"{
            "historical": [{"date": "2023-10-01", "cases": 2}],
            "forecast": [{"date": "2023-10-08", "forecast": 3, "upper": 4}],
            "country": "DE"
        }"#;
        let snapshot: OverlaySnapshot = serde_json::from_str(body).unwrap();
        assert_eq!(snapshot.country.code(), Some("DE"));
        let overlay = build_overlay(&snapshot, &OverlayConfig::default());
        assert_eq!(overlay.scale.y_max, 3.0);
        assert!(overlay.scale.ci_clipped);
    }

    #[test]
    fn test_idempotent() {
        let snapshot = sample_snapshot();
        let config = OverlayConfig::default();
        assert_eq!(
            build_overlay(&snapshot, &config),
            build_overlay(&snapshot, &config)
        );
    }
}
