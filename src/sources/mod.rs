//! CSV-backed data sources: weather observations and satellite hotspot detections.
//! The dashboard reads them through the [`WeatherSource`] / [`HotspotSource`] traits
//! so a live feed can stand in for the files.

mod hotspots;
mod weather;

pub use hotspots::{Detection, HotspotLog, HOTSPOT_COLUMNS};
pub use weather::{location_matches, WeatherLog, WeatherRecord, WEATHER_COLUMNS};

use chrono::NaiveDate;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("{} not found", path.display())]
    FileNotFound { path: PathBuf },
    #[error(
        "{} is missing columns [{}] (available: [{}])",
        path.display(),
        missing.join(", "),
        available.join(", ")
    )]
    MissingColumns {
        path: PathBuf,
        missing: Vec<String>,
        available: Vec<String>,
    },
    #[error("cannot read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub trait WeatherSource {
    fn weather(&self) -> Result<WeatherLog, DataError>;
}

pub trait HotspotSource {
    fn hotspots(&self) -> Result<HotspotLog, DataError>;
}

/// The two static CSV files.
#[derive(Debug, Clone)]
pub struct CsvSources {
    pub hotspots_csv: PathBuf,
    pub weather_csv: PathBuf,
}

impl CsvSources {
    pub fn new(config: &crate::config::DataConfig) -> Self {
        Self {
            hotspots_csv: config.hotspots_csv.clone(),
            weather_csv: config.weather_csv.clone(),
        }
    }
}

impl WeatherSource for CsvSources {
    fn weather(&self) -> Result<WeatherLog, DataError> {
        WeatherLog::load(&self.weather_csv)
    }
}

impl HotspotSource for CsvSources {
    fn hotspots(&self) -> Result<HotspotLog, DataError> {
        HotspotLog::load(&self.hotspots_csv)
    }
}

/// Open a CSV file and check its header row carries every required column.
pub(crate) fn open_csv(path: &Path, required: &[&str]) -> Result<csv::Reader<File>, DataError> {
    if !path.is_file() {
        return Err(DataError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let csv_err = |source: csv::Error| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;
    let available: Vec<String> = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !available.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataError::MissingColumns {
            path: path.to_path_buf(),
            missing,
            available,
        });
    }
    Ok(rdr)
}

/// Accepts `YYYY-MM-DD` and `DD-MM-YYYY`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d-%m-%Y"))
        .ok()
}
