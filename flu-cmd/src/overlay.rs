//! Overlay command: load data files, build the chart model and print it.

use crate::loader::{load_forecast, load_historical};
use clap::ValueEnum;
use flu_chart::overlay::{build_overlay, OverlayConfig, OverlaySnapshot, SeasonOverlay};
use flu_season::country::CountryFilter;
use log::{info, warn};
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The full chart model as pretty-printed JSON
    Json,
    /// A short human-readable summary
    Text,
}

pub struct OverlayArgs {
    pub historical: PathBuf,
    pub forecast: Option<PathBuf>,
    pub country: Option<String>,
    pub max_seasons: usize,
    pub forecast_unavailable: bool,
    pub format: OutputFormat,
}

pub fn run_overlay(args: &OverlayArgs) -> anyhow::Result<()> {
    let snapshot = load_snapshot(args)?;
    let config = OverlayConfig {
        max_seasons: args.max_seasons,
        ..OverlayConfig::default()
    };

    let overlay = build_overlay(&snapshot, &config);
    info!(
        "Built overlay with {} seasons{}",
        overlay.seasons.len(),
        if overlay.forecast.is_some() { " and a forecast" } else { "" }
    );

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&overlay)?,
        OutputFormat::Text => render_text(&overlay),
    };
    println!("{}", output);
    Ok(())
}

fn load_snapshot(args: &OverlayArgs) -> anyhow::Result<OverlaySnapshot> {
    let historical = load_historical(&args.historical)?;
    let forecast = match (&args.forecast, args.forecast_unavailable) {
        (Some(path), true) => {
            warn!("Forecast marked unavailable; ignoring {}", path.display());
            None
        }
        (Some(path), false) => Some(load_forecast(path)?),
        (None, _) => None,
    };
    Ok(OverlaySnapshot {
        historical,
        forecast,
        country: CountryFilter::new(args.country.as_deref()),
        forecast_unavailable: args.forecast_unavailable,
    })
}

/// Plain-text summary of an overlay.
pub fn render_text(overlay: &SeasonOverlay) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", overlay.title, overlay.subtitle);
    if let Some(baseline) = &overlay.gaussian_baseline {
        let _ = writeln!(out, "baseline: {}", baseline.label());
    }

    if overlay.is_empty() {
        let _ = writeln!(out, "no data to plot");
    }
    for trace in &overlay.seasons {
        let series = &trace.series;
        let peak = series
            .points
            .iter()
            .max_by(|a, b| a.cases.total_cmp(&b.cases));
        let _ = write!(
            out,
            "{}{} {} weeks",
            if series.is_current { "* " } else { "  " },
            series.season.label,
            series.points.len()
        );
        if let Some(peak) = peak {
            let _ = write!(out, ", peak {} at W{}", peak.cases, peak.week_offset);
        }
        out.push('\n');
    }

    if let Some(forecast) = &overlay.forecast {
        let first = forecast.points.first();
        let last = forecast.points.last();
        if let (Some(first), Some(last)) = (first, last) {
            let _ = writeln!(
                out,
                "  forecast W{}-W{} ({} weeks)",
                first.week_offset,
                last.week_offset,
                forecast.points.len()
            );
        }
    }
    if overlay.forecast_unavailable {
        let _ = writeln!(out, "forecast unavailable");
    }

    let _ = writeln!(out, "y max: {}", overlay.scale.y_max);
    if let Some(indicator) = &overlay.clip_indicator {
        let _ = writeln!(out, "{}", indicator.label);
    }
    out
}
