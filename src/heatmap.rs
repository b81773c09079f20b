//! Heatmap points for the map widget: real detections when the day has any,
//! otherwise points simulated around the location with score-proportional intensity.

use crate::config::{HeatmapConfig, LocationConfig};
use crate::sources::Detection;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Colour stops handed to the heat layer.
pub const GRADIENT: [(f64, &str); 5] = [
    (0.0, "green"),
    (0.3, "yellow"),
    (0.5, "orange"),
    (0.7, "red"),
    (1.0, "darkred"),
];

const MIN_DETECTION_INTENSITY: f64 = 0.1;
const BASE_SIMULATED_POINTS: usize = 15;
const POINTS_PER_SCORE_UNIT: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// 0.0–1.0
    pub intensity: f64,
}

impl HeatPoint {
    /// `[lat, lon, intensity]`, the layout the heat layer expects.
    pub fn to_array(self) -> [f64; 3] {
        [self.latitude, self.longitude, self.intensity]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatOrigin {
    Detections,
    Simulated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatLayer {
    pub origin: HeatOrigin,
    pub points: Vec<HeatPoint>,
}

fn unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Score-proportional intensity in [0, 1].
pub fn intensity_hint(score: f64) -> f64 {
    unit(score / 10.0)
}

/// Blend of radiative power (0–100 MW) and brightness (300–400 K), floored at 0.1.
pub fn detection_intensity(d: &Detection) -> f64 {
    let frp_norm = unit(d.frp / 100.0);
    let brightness_norm = unit((d.bright_t31 - 300.0) / 100.0);
    (0.6 * frp_norm + 0.4 * brightness_norm).clamp(MIN_DETECTION_INTENSITY, 1.0)
}

pub fn from_detections(detections: &[&Detection]) -> Vec<HeatPoint> {
    detections
        .iter()
        .map(|d| HeatPoint {
            latitude: d.latitude,
            longitude: d.longitude,
            intensity: detection_intensity(d),
        })
        .collect()
}

fn sample(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Deterministic for a given seed: `15 + floor(3 * score)` points within
/// `spread_deg` of the location, intensity drawn from [0.5h, 1.2h] capped at 1.
pub fn simulate(location: &LocationConfig, score: f64, config: &HeatmapConfig) -> Vec<HeatPoint> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let hint = intensity_hint(score);
    let extra = (hint * 10.0 * POINTS_PER_SCORE_UNIT) as usize;
    let spread = if config.spread_deg.is_finite() {
        config.spread_deg.abs()
    } else {
        0.0
    };

    (0..BASE_SIMULATED_POINTS + extra)
        .map(|_| {
            let lat_offset = sample(&mut rng, -spread, spread);
            let lon_offset = sample(&mut rng, -spread, spread);
            let intensity = sample(&mut rng, hint * 0.5, hint * 1.2).min(1.0);
            HeatPoint {
                latitude: location.latitude + lat_offset,
                longitude: location.longitude + lon_offset,
                intensity,
            }
        })
        .collect()
}

pub fn build_layer(
    location: &LocationConfig,
    score: f64,
    detections: &[&Detection],
    config: &HeatmapConfig,
) -> HeatLayer {
    if detections.is_empty() {
        HeatLayer {
            origin: HeatOrigin::Simulated,
            points: simulate(location, score, config),
        }
    } else {
        HeatLayer {
            origin: HeatOrigin::Detections,
            points: from_detections(detections),
        }
    }
}
