//! Command implementations for the flu season CLI.
//!
//! Provides subcommands for indexing dates onto the season week axis and
//! for building the season comparison overlay from local data files.

use clap::Subcommand;
use std::path::PathBuf;

pub mod loader;
pub mod overlay;
pub mod season;

pub use overlay::OutputFormat;

#[derive(Subcommand)]
pub enum Command {
    /// Show the season and week offset a date falls in
    Season {
        /// ISO date or timestamp, e.g. 2023-10-01 or 2023-10-01T04:00:00+02:00
        date: String,
    },

    /// Build the season comparison overlay from historical and forecast files
    Overlay {
        /// Historical cases, as a JSON array of {date, cases} or a date,cases CSV
        #[arg(long)]
        historical: PathBuf,

        /// Forecast JSON: the full /forecast body or just its forecast list
        #[arg(long)]
        forecast: Option<PathBuf>,

        /// Country code the data was filtered by (global when omitted)
        #[arg(long)]
        country: Option<String>,

        /// Number of most recent seasons to overlay
        #[arg(long, default_value_t = flu_chart::DEFAULT_MAX_SEASONS)]
        max_seasons: usize,

        /// Mark the forecast as unavailable and ignore any forecast file
        #[arg(long)]
        forecast_unavailable: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Season { date } => season::run_season(&date),
        Command::Overlay {
            historical,
            forecast,
            country,
            max_seasons,
            forecast_unavailable,
            format,
        } => overlay::run_overlay(&overlay::OverlayArgs {
            historical,
            forecast,
            country,
            max_seasons,
            forecast_unavailable,
            format,
        }),
    }
}
