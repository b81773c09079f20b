//! RiskRadar — forest fire risk monitoring dashboard.
//!
//! Modular structure:
//! - [`risk`] — Weighted-sum risk score and zone classification (pure)
//! - [`sources`] — Weather and hotspot CSV loaders
//! - [`readings`] — Weather row + location baselines → risk input, with provenance
//! - [`heatmap`] — Heat layer points (detections or simulated)
//! - [`dashboard`] — Page assembly, HTML rendering, HTTP server
//! - [`logging`] — Structured logging

pub mod config;
pub mod dashboard;
pub mod heatmap;
pub mod logging;
pub mod readings;
pub mod risk;
pub mod sources;

pub use config::RadarConfig;
pub use dashboard::{build_dashboard, render_page, Dashboard, DashboardRequest};
pub use logging::StructuredLogger;
pub use readings::{assemble, AssembledInput, Provenance};
pub use risk::{evaluate, RiskEngine, RiskInput, RiskResult, RiskZone};
pub use sources::{CsvSources, DataError, HotspotLog, WeatherLog};
