//! Decoded API records.
//!
//! These mirror the JSON the surveillance backend serves for
//! `/cases/historical` and `/forecast`. Dates are validated while decoding,
//! so a record that exists always carries a usable `CalendarDate`.

use crate::calendar_date::CalendarDate;
use anyhow::Context;
use csv::ReaderBuilder;
use log::debug;
use serde::{Deserialize, Serialize};

/// One week of reported cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub date: CalendarDate,
    pub cases: f64,
}

/// One forecast week as served by the backend. Every numeric field is
/// optional in the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastRecord {
    pub date: CalendarDate,
    #[serde(default)]
    pub forecast: Option<f64>,
    #[serde(default)]
    pub lower: Option<f64>,
    #[serde(default)]
    pub upper: Option<f64>,
    #[serde(default)]
    pub gaussian_mean: Option<f64>,
    #[serde(default)]
    pub gaussian_stddev: Option<f64>,
}

/// Body of the `/forecast` response. Both lists are empty when the backend
/// has too little data to fit a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub historical: Vec<HistoricalRecord>,
    #[serde(default)]
    pub forecast: Vec<RawForecastRecord>,
}

/// A forecast file holds either the full `/forecast` body or just its
/// `forecast` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum ForecastDocument {
    Payload(ForecastPayload),
    Records(Vec<RawForecastRecord>),
}

impl HistoricalRecord {
    /// Parse a JSON array of `{date, cases}` objects.
    pub fn from_json_str(body: &str) -> anyhow::Result<Vec<HistoricalRecord>> {
        let records: Vec<HistoricalRecord> =
            serde_json::from_str(body).context("failed to decode historical JSON")?;
        debug!("decoded {} historical records from JSON", records.len());
        Ok(records)
    }

    /// Parse CSV with a `date,cases` header row.
    pub fn from_csv_str(body: &str) -> anyhow::Result<Vec<HistoricalRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());
        let records = reader
            .deserialize::<HistoricalRecord>()
            .enumerate()
            .map(|(row, result)| {
                result.with_context(|| format!("failed to decode historical CSV row {}", row + 1))
            })
            .collect::<anyhow::Result<Vec<HistoricalRecord>>>()?;
        debug!("decoded {} historical records from CSV", records.len());
        Ok(records)
    }
}

impl ForecastPayload {
    pub fn from_json_str(body: &str) -> anyhow::Result<ForecastPayload> {
        let document: ForecastDocument =
            serde_json::from_str(body).context("failed to decode forecast JSON")?;
        let payload = match document {
            ForecastDocument::Payload(payload) => payload,
            ForecastDocument::Records(forecast) => ForecastPayload {
                historical: Vec::new(),
                forecast,
            },
        };
        debug!(
            "decoded forecast payload: {} historical, {} forecast records",
            payload.historical.len(),
            payload.forecast.len()
        );
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_historical_json() {
        let body = r#"[
            {"date": "2023-10-01", "cases": 120},
            {"date": "2023-10-08", "cases": 135.5}
        ]"#;
        let records = HistoricalRecord::from_json_str(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].cases, 135.5);
        assert_eq!(records[0].date.to_string(), "2023-10-01");
    }

    #[test]
    fn test_historical_json_rejects_bad_date() {
        let body = r#"[{"date": "2023-13-01", "cases": 1}]"#;
        let err = HistoricalRecord::from_json_str(body).unwrap_err();
        assert!(format!("{err:#}").contains("invalid date"));
    }

    #[test]
    fn test_historical_csv() {
        let body = "\
date,cases
2022-10-02, 40
2022-10-09,55
";
        let records = HistoricalRecord::from_csv_str(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cases, 40.0);
        assert_eq!(records[1].date.to_string(), "2022-10-09");
    }

    #[test]
    fn test_historical_csv_reports_row() {
        let body = "date,cases\n2022-10-02,40\nbogus,55\n";
        let err = HistoricalRecord::from_csv_str(body).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_forecast_payload_with_missing_fields() {
        let body = r#"{
            "historical": [],
            "forecast": [
                {"date": "2024-01-07", "forecast": 80, "lower": 60, "upper": 100,
                 "gaussian_mean": 75.25, "gaussian_stddev": 9.5},
                {"date": "2024-01-14", "forecast": null}
            ]
        }"#;
        let payload = ForecastPayload::from_json_str(body).unwrap();
        assert!(payload.historical.is_empty());
        assert_eq!(payload.forecast.len(), 2);
        assert_eq!(payload.forecast[0].gaussian_mean, Some(75.25));
        assert_eq!(payload.forecast[1].forecast, None);
        assert_eq!(payload.forecast[1].upper, None);
    }

    #[test]
    fn test_forecast_bare_list() {
        let body = r#"[{"date": "2024-01-07", "forecast": 80}]"#;
        let payload = ForecastPayload::from_json_str(body).unwrap();
        assert_eq!(payload.forecast.len(), 1);
        assert!(payload.historical.is_empty());
    }

    #[test]
    fn test_forecast_empty_object() {
        let payload = ForecastPayload::from_json_str("{}").unwrap();
        assert_eq!(payload, ForecastPayload::default());
    }
}
