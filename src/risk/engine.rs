//! Combines five normalized factors with fixed weights into a 0–10 score and maps it to a zone.

use crate::config::RiskConfig;
use serde::{Deserialize, Serialize};

/// Factor weights in order: temperature, dryness of air (1 - humidity), wind,
/// vegetation dryness, historical fire probability. They sum to 1.0.
pub const WEIGHTS: [f64; 5] = [0.30, 0.25, 0.20, 0.15, 0.10];

pub const MAX_STARS: u8 = 10;

const TEMP_MIN_C: f64 = 10.0;
const TEMP_MAX_C: f64 = 50.0;
const HUMIDITY_MAX_PCT: f64 = 100.0;
const WIND_MAX_KMH: f64 = 50.0;
const MAX_SCORE: f64 = 10.0;

/// Environmental readings for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskInput {
    /// °C, expected 10–50
    pub temperature: f64,
    /// %, expected 0–100
    pub humidity: f64,
    /// km/h, expected 0–50
    pub wind_speed: f64,
    /// 0.0–1.0
    pub vegetation_dryness: f64,
    /// 0.0–1.0, looked up per location
    pub historical_fire_probability: f64,
}

/// Each reading mapped into [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFactors {
    pub temperature: f64,
    pub humidity: f64,
    pub wind: f64,
    pub dryness: f64,
    pub historical: f64,
}

/// NaN maps to 0; infinities clamp to the nearest bound.
fn unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

impl NormalizedFactors {
    pub fn from_input(input: &RiskInput) -> Self {
        Self {
            temperature: unit((input.temperature - TEMP_MIN_C) / (TEMP_MAX_C - TEMP_MIN_C)),
            humidity: unit(input.humidity / HUMIDITY_MAX_PCT),
            wind: unit(input.wind_speed / WIND_MAX_KMH),
            dryness: unit(input.vegetation_dryness),
            historical: unit(input.historical_fire_probability),
        }
    }

    /// Weighted sum scaled to 0–10.
    pub fn score(&self) -> f64 {
        let terms = [
            self.temperature,
            1.0 - self.humidity,
            self.wind,
            self.dryness,
            self.historical,
        ];
        let sum: f64 = WEIGHTS.iter().zip(terms).map(|(w, t)| w * t).sum();
        (MAX_SCORE * sum).clamp(0.0, MAX_SCORE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskZone {
    Safe,
    Moderate,
    Danger,
}

impl RiskZone {
    /// Half-open bands: [0, moderate) SAFE, [moderate, danger) MODERATE, [danger, 10] DANGER.
    pub fn from_score(score: f64, config: &RiskConfig) -> Self {
        if score >= config.danger_threshold {
            RiskZone::Danger
        } else if score >= config.moderate_threshold {
            RiskZone::Moderate
        } else {
            RiskZone::Safe
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskZone::Safe => "SAFE",
            RiskZone::Moderate => "MODERATE",
            RiskZone::Danger => "DANGER",
        }
    }

    /// Page headline
    pub fn title(self) -> &'static str {
        match self {
            RiskZone::Safe => "SAFE ZONE",
            RiskZone::Moderate => "MODERATE RISK",
            RiskZone::Danger => "DANGER ZONE",
        }
    }

    /// Short alert text
    pub fn alert(self) -> &'static str {
        match self {
            RiskZone::Safe => "Conditions stable",
            RiskZone::Moderate => "Increase monitoring",
            RiskZone::Danger => "Deploy patrol units",
        }
    }

    /// Full advisory shown in the alert box.
    pub fn advisory(self) -> &'static str {
        match self {
            RiskZone::Safe => "LOW RISK – Conditions stable. Continue routine monitoring.",
            RiskZone::Moderate => {
                "MODERATE RISK – Increase monitoring frequency. Prepare response teams."
            }
            RiskZone::Danger => {
                "HIGH FIRE RISK ALERT – Immediate surveillance required. Deploy patrol units and notify authorities immediately."
            }
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RiskZone::Safe => "✅",
            RiskZone::Moderate => "⚠️",
            RiskZone::Danger => "🚨",
        }
    }

    /// CSS colour of the zone title and stars
    pub fn color(self) -> &'static str {
        match self {
            RiskZone::Safe => "#28a745",
            RiskZone::Moderate => "#fd7e14",
            RiskZone::Danger => "#dc3545",
        }
    }

    pub fn marker_color(self) -> &'static str {
        match self {
            RiskZone::Safe => "green",
            RiskZone::Moderate => "orange",
            RiskZone::Danger => "red",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            RiskZone::Safe => "alert-safe",
            RiskZone::Moderate => "alert-moderate",
            RiskZone::Danger => "alert-danger",
        }
    }
}

impl std::fmt::Display for RiskZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk result for a single evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub score: f64,
    pub zone: RiskZone,
}

impl RiskResult {
    pub fn filled_stars(&self) -> u8 {
        let s = if self.score.is_nan() { 0.0 } else { self.score };
        s.round().clamp(0.0, f64::from(MAX_STARS)) as u8
    }

    pub fn empty_stars(&self) -> u8 {
        MAX_STARS - self.filled_stars()
    }

    /// e.g. "⭐⭐⭐☆☆☆☆☆☆☆"
    pub fn star_rating(&self) -> String {
        let mut out = "⭐".repeat(self.filled_stars() as usize);
        out.push_str(&"☆".repeat(self.empty_stars() as usize));
        out
    }
}

pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    /// Thresholds that are not finite or not ordered fall back to the defaults.
    pub fn new(config: RiskConfig) -> Self {
        let valid = config.moderate_threshold.is_finite()
            && config.danger_threshold.is_finite()
            && config.moderate_threshold <= config.danger_threshold;
        if valid {
            Self { config }
        } else {
            tracing::warn!(
                moderate = config.moderate_threshold,
                danger = config.danger_threshold,
                "invalid risk thresholds; using defaults"
            );
            Self {
                config: RiskConfig::default(),
            }
        }
    }

    pub fn evaluate(&self, input: &RiskInput) -> RiskResult {
        let score = NormalizedFactors::from_input(input).score();
        RiskResult {
            score,
            zone: RiskZone::from_score(score, &self.config),
        }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(RiskConfig::default())
    }
}

/// Evaluate with the standard thresholds (4.0 and 7.0).
pub fn evaluate(input: &RiskInput) -> RiskResult {
    RiskEngine::default().evaluate(input)
}
