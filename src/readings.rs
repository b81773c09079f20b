//! Maps a weather row and the location table onto a [`RiskInput`].
//!
//! The weather feed carries temperature and wind but usually not humidity or
//! vegetation dryness. Rather than silently defaulting, every field records
//! where its value came from so the dashboard can show it.

use crate::config::LocationConfig;
use crate::risk::RiskInput;
use crate::sources::WeatherRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Read from the weather row
    Observed,
    /// Location baseline from the static table
    Baseline,
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Observed => "observed",
            Provenance::Baseline => "baseline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputProvenance {
    pub temperature: Provenance,
    pub humidity: Provenance,
    pub wind_speed: Provenance,
    pub vegetation_dryness: Provenance,
    pub precipitation: Provenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssembledInput {
    pub input: RiskInput,
    /// mm; shown on the page, not scored
    pub precipitation: f64,
    pub provenance: InputProvenance,
}

fn pick(observed: Option<f64>, baseline: f64) -> (f64, Provenance) {
    match observed {
        Some(v) if v.is_finite() => (v, Provenance::Observed),
        _ => (baseline, Provenance::Baseline),
    }
}

pub fn assemble(location: &LocationConfig, record: Option<&WeatherRecord>) -> AssembledInput {
    let base = &location.baseline;
    let (temperature, temp_src) = pick(record.map(|r| r.temperature), base.temperature);
    let (wind_speed, wind_src) = pick(record.map(|r| r.wind_speed), base.wind_speed);
    let (precipitation, precip_src) = pick(record.map(|r| r.precipitation), base.precipitation);
    let (humidity, hum_src) = pick(record.and_then(|r| r.humidity), base.humidity);
    let (vegetation_dryness, dry_src) = pick(
        record.and_then(|r| r.vegetation_dryness),
        base.vegetation_dryness,
    );

    AssembledInput {
        input: RiskInput {
            temperature,
            humidity,
            wind_speed,
            vegetation_dryness,
            historical_fire_probability: location.historical_fire_probability,
        },
        precipitation,
        provenance: InputProvenance {
            temperature: temp_src,
            humidity: hum_src,
            wind_speed: wind_src,
            vegetation_dryness: dry_src,
            precipitation: precip_src,
        },
    }
}
