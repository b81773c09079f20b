//! Satellite hotspot detections in the NASA FIRMS column layout.

use super::{open_csv, parse_date, DataError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

pub const HOTSPOT_COLUMNS: [&str; 6] = [
    "latitude",
    "longitude",
    "bright_t31",
    "frp",
    "daynight",
    "acq_date",
];

#[derive(Debug, Deserialize)]
struct RawDetection {
    latitude: f64,
    longitude: f64,
    bright_t31: f64,
    frp: f64,
    daynight: String,
    acq_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub latitude: f64,
    pub longitude: f64,
    /// Channel 31 brightness temperature (K)
    pub bright_t31: f64,
    /// Fire radiative power (MW)
    pub frp: f64,
    /// "D" or "N"
    pub daynight: String,
    pub acq_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotspotLog {
    pub detections: Vec<Detection>,
    pub skipped: usize,
}

impl HotspotLog {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self {
            detections,
            skipped: 0,
        }
    }

    pub fn load(path: &Path) -> Result<Self, DataError> {
        let mut rdr = open_csv(path, &HOTSPOT_COLUMNS)?;
        let mut log = HotspotLog::default();
        for (i, row) in rdr.deserialize::<RawDetection>().enumerate() {
            let parsed = row.map_err(|e| e.to_string()).and_then(|raw| {
                let acq_date = parse_date(&raw.acq_date)
                    .ok_or_else(|| format!("unparsable acq_date {:?}", raw.acq_date))?;
                Ok(Detection {
                    latitude: raw.latitude,
                    longitude: raw.longitude,
                    bright_t31: raw.bright_t31,
                    frp: raw.frp,
                    daynight: raw.daynight,
                    acq_date,
                })
            });
            match parsed {
                Ok(d) => log.detections.push(d),
                Err(e) => {
                    log.skipped += 1;
                    warn!(path = %path.display(), row = i + 2, error = %e, "skipping hotspot row");
                }
            }
        }
        debug!(
            path = %path.display(),
            detections = log.detections.len(),
            skipped = log.skipped,
            "hotspot log loaded"
        );
        Ok(log)
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Distinct acquisition dates, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.detections
            .iter()
            .map(|d| d.acq_date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.detections.iter().map(|d| d.acq_date).max()
    }

    pub fn on(&self, date: NaiveDate) -> Vec<&Detection> {
        self.detections
            .iter()
            .filter(|d| d.acq_date == date)
            .collect()
    }
}
