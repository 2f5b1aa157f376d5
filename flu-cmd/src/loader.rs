//! Reading historical and forecast data files.

use anyhow::Context;
use flu_season::records::{ForecastPayload, HistoricalRecord, RawForecastRecord};
use log::{info, warn};
use std::fs;
use std::path::Path;

/// Load historical records. Files ending in `.csv` are read as `date,cases`
/// CSV; anything else as a JSON array.
pub fn load_historical(path: &Path) -> anyhow::Result<Vec<HistoricalRecord>> {
    let body = read(path)?;
    let records = if is_csv(path) {
        HistoricalRecord::from_csv_str(&body)
    } else {
        HistoricalRecord::from_json_str(&body)
    }
    .with_context(|| format!("failed to load historical data from {}", path.display()))?;
    info!("Loaded {} historical records from {}", records.len(), path.display());
    Ok(records)
}

/// Load forecast records from a `/forecast` response body or a bare list.
pub fn load_forecast(path: &Path) -> anyhow::Result<Vec<RawForecastRecord>> {
    let body = read(path)?;
    let payload = ForecastPayload::from_json_str(&body)
        .with_context(|| format!("failed to load forecast from {}", path.display()))?;
    if payload.forecast.is_empty() {
        warn!("Forecast file {} has no forecast weeks", path.display());
    }
    info!("Loaded {} forecast records from {}", payload.forecast.len(), path.display());
    Ok(payload.forecast)
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        write!(file, "{}", body).unwrap();
        file
    }

    #[test]
    fn test_load_historical_json() {
        let file = temp_file(
            ".json",
            r#"[{"date": "2023-10-01", "cases": 4}, {"date": "2023-10-08", "cases": 6.5}]"#,
        );
        let records = load_historical(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].cases, 6.5);
    }

    #[test]
    fn test_load_historical_csv() {
        let file = temp_file(".CSV", "date,cases\n2023-10-01,4\n2023-10-08,7\n");
        let records = load_historical(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date.to_string(), "2023-10-01");
    }

    #[test]
    fn test_csv_body_without_csv_suffix_is_read_as_json() {
        let file = temp_file(".txt", "date,cases\n2023-10-01,4\n");
        assert!(load_historical(file.path()).is_err());
    }

    #[test]
    fn test_load_forecast_payload() {
        let file = temp_file(
            ".json",
            r#"{"historical": [], "forecast": [{"date": "2023-10-15", "forecast": 3}]}"#,
        );
        let records = load_forecast(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].forecast, Some(3.0));
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");
        let err = load_historical(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("does-not-exist.json"));
    }

    #[test]
    fn test_bad_date_is_error() {
        let file = temp_file(".json", r#"[{"date": "2023-02-30", "cases": 1}]"#);
        assert!(load_historical(file.path()).is_err());
    }
}
