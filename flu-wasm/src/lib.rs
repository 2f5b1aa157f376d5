//! Flu WASM - season comparison chart model for web browsers.
//!
//! The pipeline entry points take a JSON string and return a JSON string.
//! Failures come back as `{"error": "..."}` rather than as exceptions, so
//! callers only ever need `JSON.parse`. Colour and query helpers take and
//! return plain values.

use flu_chart::align::AlignedSeries;
use flu_chart::overlay::{OverlayConfig, OverlaySnapshot};
use flu_chart::DEFAULT_MAX_SEASONS;
use flu_season::calendar_date::CalendarDate;
use flu_season::country::CountryFilter;
use flu_season::points::{seasoned_points, ForecastPoint};
use flu_season::records::{ForecastPayload, HistoricalRecord};
use flu_season::season::{SeasonKey, WeekOffset};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct IndexSeasonInput {
    date: CalendarDate,
}

#[derive(Serialize)]
struct IndexSeasonOutput {
    #[serde(flatten)]
    season: SeasonKey,
    week_offset: WeekOffset,
    anchor: CalendarDate,
}

#[derive(Deserialize)]
struct AlignSeriesInput {
    historical: Vec<HistoricalRecord>,
    #[serde(default = "default_max_seasons")]
    max_seasons: usize,
}

#[derive(Deserialize)]
struct UnifyScaleInput {
    /// Output of `align_series`.
    #[serde(default)]
    seasons: AlignedSeries,
    /// Output of `project_forecast`.
    #[serde(default)]
    forecast: Vec<ForecastPoint>,
}

#[derive(Deserialize)]
struct BuildOverlayInput {
    #[serde(flatten)]
    snapshot: OverlaySnapshot,
    #[serde(default = "default_max_seasons")]
    max_seasons: usize,
}

#[derive(Serialize)]
struct ErrorOutput {
    error: String,
}

fn default_max_seasons() -> usize {
    DEFAULT_MAX_SEASONS
}

fn respond<T: Serialize>(result: Result<T, String>) -> String {
    let serialized = match result {
        Ok(value) => serde_json::to_string(&value)
            .map_err(|e| format!("Failed to serialize output: {}", e)),
        Err(error) => Err(error),
    };
    match serialized {
        Ok(json) => json,
        Err(error) => {
            log::warn!("flu-wasm: {}", error);
            serde_json::to_string(&ErrorOutput { error })
                .unwrap_or_else(|_| r#"{"error":"Failed to serialize error"}"#.to_string())
        }
    }
}

fn parse<'a, T: Deserialize<'a>>(input_json: &'a str) -> Result<T, String> {
    serde_json::from_str(input_json).map_err(|e| format!("Failed to parse input: {}", e))
}

/// `{"date": "2023-10-01"}` to `{"season_year", "label", "week_offset", "anchor"}`.
#[wasm_bindgen]
pub fn index_season(input_json: &str) -> String {
    respond(parse::<IndexSeasonInput>(input_json).and_then(|input| {
        let (season, week_offset) = flu_season::season::index_season(&input.date);
        let anchor = season.anchor().map_err(|e| e.to_string())?;
        Ok(IndexSeasonOutput {
            season,
            week_offset,
            anchor,
        })
    }))
}

/// `{"historical": [{date, cases}], "max_seasons"?}` to the retained
/// seasons, oldest first.
#[wasm_bindgen]
pub fn align_series(input_json: &str) -> String {
    respond(parse::<AlignSeriesInput>(input_json).map(|input| {
        let points = seasoned_points(&input.historical);
        flu_chart::align_series(&points, input.max_seasons)
    }))
}

/// A `/forecast` response body, or just its forecast list, to the forecast
/// points in view.
#[wasm_bindgen]
pub fn project_forecast(input_json: &str) -> String {
    respond(
        ForecastPayload::from_json_str(input_json)
            .map(|payload| flu_chart::project_forecast(&payload.forecast))
            .map_err(|e| format!("{:#}", e)),
    )
}

/// `{"seasons": <align_series output>, "forecast": <project_forecast output>}`
/// to `{"y_max", "ci_clipped"}`.
#[wasm_bindgen]
pub fn unify_scale(input_json: &str) -> String {
    respond(parse::<UnifyScaleInput>(input_json).map(|input| {
        let historical: Vec<_> = input.seasons.points().cloned().collect();
        flu_chart::unify_scale(&historical, &input.forecast)
    }))
}

/// `{"historical", "forecast"?, "country"?, "forecast_unavailable"?,
/// "max_seasons"?}` to the full chart model.
#[wasm_bindgen]
pub fn build_overlay(input_json: &str) -> String {
    respond(parse::<BuildOverlayInput>(input_json).map(|input| {
        let config = OverlayConfig {
            max_seasons: input.max_seasons,
            ..OverlayConfig::default()
        };
        flu_chart::build_overlay(&input.snapshot, &config)
    }))
}

/// Line colour for an influenza subtype or lineage.
#[wasm_bindgen]
pub fn subtype_color(subtype: &str) -> String {
    flu_chart::palette::subtype_color(subtype).to_string()
}

/// Traffic-light colour for an anomaly severity in `0.0..=1.0`.
#[wasm_bindgen]
pub fn severity_color(severity: f64) -> String {
    flu_chart::palette::severity_color(severity).to_string()
}

/// `country=XX` query fragment for a country code; `undefined` when the
/// code is blank (global totals).
#[wasm_bindgen]
pub fn country_query(code: &str) -> Option<String> {
    CountryFilter::new(Some(code)).query_params()
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
