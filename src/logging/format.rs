//! JSON log lines: one JSON object per line (ndjson) for ingestion and audit.

use crate::dashboard::Dashboard;
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Summary of one evaluation, written after a one-shot render.
#[derive(Debug, Serialize)]
pub struct EvaluationLog<'a> {
    pub ts: String,
    pub location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub score: f64,
    pub zone: &'a str,
    pub filled_stars: u8,
    pub hotspots: usize,
    pub heat_origin: crate::heatmap::HeatOrigin,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl<'a> EvaluationLog<'a> {
    pub fn from_dashboard(d: &'a Dashboard) -> Self {
        Self {
            ts: chrono::Utc::now().to_rfc3339(),
            location: &d.location.name,
            date: d.date.map(|x| x.to_string()),
            score: d.result.score,
            zone: d.result.zone.as_str(),
            filled_stars: d.result.filled_stars(),
            hotspots: d.hotspot_count,
            heat_origin: d.heat.origin,
            notices: d.notices.iter().map(|n| n.message.as_str()).collect(),
            output: None,
        }
    }
}

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install global subscriber to stderr, level from RUST_LOG or `default_level`.
    /// With `json`, one JSON object per line.
    pub fn init(json: bool, default_level: &str) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr);
            let _ = tracing_subscriber::registry().with(filter).with(fmt).try_init();
        } else {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init();
        }
    }

    /// Emit a single structured line (e.g. an evaluation summary) without going through tracing
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) {
        if let Ok(line) = serde_json::to_string(event) {
            let _ = writeln!(w, "{}", line);
        }
    }
}
