//! Fire risk scoring: weighted sum of normalized readings, then zone classification.

mod engine;

pub use engine::{
    evaluate, NormalizedFactors, RiskEngine, RiskInput, RiskResult, RiskZone, MAX_STARS, WEIGHTS,
};
