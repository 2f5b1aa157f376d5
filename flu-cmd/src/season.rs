//! Season lookup for a single date.

use anyhow::Context;
use flu_season::calendar_date::CalendarDate;
use flu_season::season::index_season;
use log::info;

/// Print the season label, week offset and season start for `date`.
pub fn run_season(date: &str) -> anyhow::Result<()> {
    println!("{}", describe_season(date)?);
    Ok(())
}

pub fn describe_season(date: &str) -> anyhow::Result<String> {
    let date = CalendarDate::parse(date).context("failed to parse date")?;
    let (season, week_offset) = index_season(&date);
    let anchor = season.anchor()?;
    info!("{} falls in season {}", date, season.label);
    Ok(format!(
        "{}: season {} week {} (season starts {})",
        date, season.label, week_offset, anchor
    ))
}
