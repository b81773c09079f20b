//! Weather observation log (one row per station reading).

use super::{open_csv, parse_date, DataError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Columns every weather file must carry. `date`, `location`, `weather_type`,
/// `humidity` and `vegetation_dryness` are optional.
pub const WEATHER_COLUMNS: [&str; 3] = ["temperature", "wind_speed", "precipitation"];

#[derive(Debug, Deserialize)]
struct RawWeatherRow {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    weather_type: Option<String>,
    temperature: f64,
    wind_speed: f64,
    precipitation: f64,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    humidity: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    vegetation_dryness: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub weather_type: Option<String>,
    /// °C
    pub temperature: f64,
    /// km/h
    pub wind_speed: f64,
    /// mm
    pub precipitation: f64,
    /// %, when the station reports it
    pub humidity: Option<f64>,
    /// 0.0–1.0, when the feed carries it
    pub vegetation_dryness: Option<f64>,
}

impl WeatherRecord {
    fn from_raw(raw: RawWeatherRow) -> Result<Self, String> {
        let date = match raw.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(parse_date(s).ok_or_else(|| format!("unparsable date {s:?}"))?),
        };
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        Ok(Self {
            date,
            location: non_empty(raw.location),
            weather_type: non_empty(raw.weather_type),
            temperature: raw.temperature,
            wind_speed: raw.wind_speed,
            precipitation: raw.precipitation,
            humidity: raw.humidity,
            vegetation_dryness: raw.vegetation_dryness,
        })
    }
}

/// A row's location matches a table entry when equal ignoring case, or equal to
/// the entry's first comma-separated part ("California" matches "California, USA").
pub fn location_matches(record_location: &str, table_name: &str) -> bool {
    let rec = record_location.trim();
    if rec.eq_ignore_ascii_case(table_name.trim()) {
        return true;
    }
    table_name
        .split(',')
        .next()
        .map(|head| head.trim().eq_ignore_ascii_case(rec))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherLog {
    pub records: Vec<WeatherRecord>,
    /// Rows dropped because a value did not parse
    pub skipped: usize,
}

impl WeatherLog {
    pub fn new(records: Vec<WeatherRecord>) -> Self {
        Self {
            records,
            skipped: 0,
        }
    }

    pub fn load(path: &Path) -> Result<Self, DataError> {
        let mut rdr = open_csv(path, &WEATHER_COLUMNS)?;
        let mut log = WeatherLog::default();
        for (i, row) in rdr.deserialize::<RawWeatherRow>().enumerate() {
            let parsed = row.map_err(|e| e.to_string()).and_then(WeatherRecord::from_raw);
            match parsed {
                Ok(rec) => log.records.push(rec),
                Err(e) => {
                    log.skipped += 1;
                    warn!(path = %path.display(), row = i + 2, error = %e, "skipping weather row");
                }
            }
        }
        debug!(
            path = %path.display(),
            records = log.records.len(),
            skipped = log.skipped,
            "weather log loaded"
        );
        Ok(log)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Last row of the log.
    pub fn latest(&self) -> Option<&WeatherRecord> {
        self.records.last()
    }

    /// Last row for `location` (rows without a location match any) on `date` if given.
    pub fn select(&self, location: &str, date: Option<NaiveDate>) -> Option<&WeatherRecord> {
        self.records.iter().rev().find(|r| {
            let loc_ok = r
                .location
                .as_deref()
                .map_or(true, |l| location_matches(l, location));
            let date_ok = date.map_or(true, |d| r.date == Some(d));
            loc_ok && date_ok
        })
    }
}
