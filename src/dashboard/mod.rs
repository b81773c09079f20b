//! Dashboard assembly: load both sources, pick location and date, evaluate, build the heat layer.
//! Rendering lives in [`page`], HTTP serving in [`server`].

mod page;
mod server;

pub use page::{render_page, PageError, PageRenderer};
pub use server::{router, serve, AppState};

use crate::config::{HeatmapConfig, LocationConfig, RadarConfig};
use crate::heatmap::{self, HeatLayer};
use crate::readings::{assemble, AssembledInput};
use crate::risk::{RiskEngine, RiskResult};
use crate::sources::{HotspotLog, HotspotSource, WeatherLog, WeatherRecord, WeatherSource};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// User-visible message shown above the zone title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// What the page was asked to show; both fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardRequest {
    pub location: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("location table is empty")]
    NoLocations,
}

/// Everything the page needs, also served as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub location: LocationConfig,
    /// Names for the location selector
    pub locations: Vec<String>,
    pub date: Option<NaiveDate>,
    /// Dates with detections, for the date selector
    pub available_dates: Vec<NaiveDate>,
    pub weather: Option<WeatherRecord>,
    pub assembled: AssembledInput,
    pub result: RiskResult,
    pub stars: String,
    pub heat: HeatLayer,
    /// Detections on the selected date
    pub hotspot_count: usize,
    pub notices: Vec<Notice>,
    #[serde(skip)]
    pub heatmap: HeatmapConfig,
}

fn load_or_notice<T: Default>(
    what: &str,
    loaded: Result<T, crate::sources::DataError>,
    notices: &mut Vec<Notice>,
) -> T {
    match loaded {
        Ok(v) => v,
        Err(e) => {
            warn!(source = what, error = %e, "data source unavailable");
            notices.push(Notice::new(NoticeLevel::Error, format!("{what}: {e}")));
            T::default()
        }
    }
}

pub fn build_dashboard(
    config: &RadarConfig,
    weather_source: &dyn WeatherSource,
    hotspot_source: &dyn HotspotSource,
    request: &DashboardRequest,
) -> Result<Dashboard, DashboardError> {
    let mut notices = Vec::new();

    let requested = request
        .location
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let location = config
        .resolve_location(requested)
        .ok_or(DashboardError::NoLocations)?
        .clone();
    if let Some(name) = requested {
        if config.location(name).is_none() {
            notices.push(Notice::new(
                NoticeLevel::Warning,
                format!("Unknown location {name:?}; showing {}", location.name),
            ));
        }
    }

    let hotspots: HotspotLog = load_or_notice("Hotspot data", hotspot_source.hotspots(), &mut notices);
    let weather: WeatherLog = load_or_notice("Weather data", weather_source.weather(), &mut notices);
    for (what, skipped) in [("hotspot", hotspots.skipped), ("weather", weather.skipped)] {
        if skipped > 0 {
            notices.push(Notice::new(
                NoticeLevel::Warning,
                format!("{skipped} unreadable {what} row(s) skipped"),
            ));
        }
    }

    let requested_date = request
        .date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let date = match requested_date {
        Some(s) => match crate::sources::parse_date(s) {
            Some(d) => Some(d),
            None => {
                notices.push(Notice::new(
                    NoticeLevel::Warning,
                    format!("Unrecognised date {s:?}; expected YYYY-MM-DD or DD-MM-YYYY"),
                ));
                hotspots.latest_date()
            }
        },
        None => hotspots.latest_date(),
    };

    let record = weather.select(&location.name, date).cloned();
    if record.is_none() {
        let when = date.map(|d| format!(" on {d}")).unwrap_or_default();
        notices.push(Notice::new(
            NoticeLevel::Warning,
            format!(
                "No weather record for {}{when}; using location baselines",
                location.name
            ),
        ));
    }

    let assembled = assemble(&location, record.as_ref());
    let result = RiskEngine::new(config.risk.clone()).evaluate(&assembled.input);

    let detections = date.map(|d| hotspots.on(d)).unwrap_or_default();
    let heat = heatmap::build_layer(&location, result.score, &detections, &config.heatmap);
    if detections.is_empty() {
        notices.push(Notice::new(
            NoticeLevel::Info,
            "No satellite detections for this date; heatmap points are simulated from the risk score",
        ));
    }

    info!(
        location = %location.name,
        date = ?date,
        score = result.score,
        zone = %result.zone,
        hotspots = detections.len(),
        origin = ?heat.origin,
        "risk evaluated"
    );

    Ok(Dashboard {
        locations: config.locations.iter().map(|l| l.name.clone()).collect(),
        available_dates: hotspots.dates(),
        date,
        weather: record,
        stars: result.star_rating(),
        hotspot_count: detections.len(),
        heat,
        assembled,
        result,
        notices,
        heatmap: config.heatmap.clone(),
        location,
    })
}
