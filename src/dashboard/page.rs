//! Self-contained HTML page: header, zone title, star rating, Leaflet heatmap, alert box.
//!
//! Markup lives in `templates/`; tera autoescapes every `.html` template, so only
//! the pre-encoded map data is marked `safe`.

use super::{Dashboard, Notice};
use crate::heatmap::{HeatOrigin, GRADIENT};
use crate::readings::Provenance;
use serde::Serialize;
use tera::{Context, Tera};

const PAGE: &str = "dashboard.html";
const POPUP: &str = "popup.html";
const TOOLTIP: &str = "tooltip.html";

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("page template: {0}")]
    Template(#[from] tera::Error),
    #[error("map data: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct DateOption {
    value: String,
    label: String,
    selected: bool,
}

#[derive(Serialize)]
struct ReadingRow {
    label: &'static str,
    value: String,
    provenance: Option<&'static str>,
}

#[derive(Serialize)]
struct ZoneView {
    title: &'static str,
    color: &'static str,
    css_class: &'static str,
    icon: &'static str,
    advisory: &'static str,
}

/// Inlined into `<script>`; strings here are already JSON.
#[derive(Serialize)]
struct MapView {
    lat: f64,
    lon: f64,
    zoom: u8,
    points: String,
    gradient: String,
    marker: String,
    popup: String,
    tooltip: String,
    radius: u32,
    blur: u32,
    min_opacity: f64,
    max_opacity: f64,
}

#[derive(Serialize)]
struct PageView<'a> {
    with_controls: bool,
    location: &'a str,
    locations: &'a [String],
    dates: Vec<DateOption>,
    date_label: Option<String>,
    notices: &'a [Notice],
    zone: ZoneView,
    score: String,
    stars: &'a str,
    readings: Vec<ReadingRow>,
    conditions: Option<&'a str>,
    heat_heading: &'static str,
    hotspot_count: usize,
    weather_json: String,
    map: MapView,
}

#[derive(Serialize)]
struct PopupView<'a> {
    location: &'a str,
    date: String,
    score: String,
    readings: &'a [ReadingRow],
    hotspot_count: usize,
}

/// JSON safe to inline inside a `<script>` element.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn readings(d: &Dashboard) -> Vec<ReadingRow> {
    let input = &d.assembled.input;
    let p = &d.assembled.provenance;
    let row = |label: &'static str, value: String, source: Option<Provenance>| ReadingRow {
        label,
        value,
        provenance: source.map(Provenance::as_str),
    };
    vec![
        row("🌡️ Temperature", format!("{:.1}°C", input.temperature), Some(p.temperature)),
        row("💧 Humidity", format!("{:.1}%", input.humidity), Some(p.humidity)),
        row("💨 Wind Speed", format!("{:.1} km/h", input.wind_speed), Some(p.wind_speed)),
        row("🌿 Vegetation Dryness", format!("{:.2}", input.vegetation_dryness), Some(p.vegetation_dryness)),
        row("🌧️ Precipitation", format!("{:.1} mm", d.assembled.precipitation), Some(p.precipitation)),
        row("🔥 Historical Fire Probability", format!("{:.2}", input.historical_fire_probability), None),
    ]
}

/// Owns the parsed templates; build once and reuse across requests.
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    pub fn new() -> Result<Self, PageError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (PAGE, include_str!("../../templates/dashboard.html")),
            (POPUP, include_str!("../../templates/popup.html")),
            (TOOLTIP, "{{ location }} - Risk: {{ score }}/10"),
        ])?;
        Ok(Self { tera })
    }

    fn render_view<T: Serialize>(&self, name: &str, view: &T) -> Result<String, PageError> {
        let context = Context::from_serialize(view)?;
        Ok(self.tera.render(name, &context)?)
    }

    /// `with_controls` adds the location/date selector form, which only makes
    /// sense when served over HTTP.
    pub fn render(&self, d: &Dashboard, with_controls: bool) -> Result<String, PageError> {
        let zone = d.result.zone;
        let rows = readings(d);
        let score = format!("{:.2}", d.result.score);

        let popup = self.render_view(
            POPUP,
            &PopupView {
                location: &d.location.name,
                date: d
                    .date
                    .map(|x| x.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "n/a".to_string()),
                score: score.clone(),
                readings: &rows,
                hotspot_count: d.hotspot_count,
            },
        )?;
        let tooltip = self.render_view(
            TOOLTIP,
            &serde_json::json!({
                "location": d.location.name,
                "score": format!("{:.1}", d.result.score),
            }),
        )?;

        let points: Vec<[f64; 3]> = d.heat.points.iter().map(|p| p.to_array()).collect();
        let gradient: serde_json::Map<String, serde_json::Value> = GRADIENT
            .iter()
            .map(|(stop, color)| (stop.to_string(), serde_json::Value::from(*color)))
            .collect();
        let map = MapView {
            lat: d.location.latitude,
            lon: d.location.longitude,
            zoom: d.location.zoom,
            points: script_json(&points)?,
            gradient: script_json(&gradient)?,
            marker: script_json(zone.marker_color())?,
            popup: script_json(popup.trim_end())?,
            tooltip: script_json(&tooltip)?,
            radius: d.heatmap.radius,
            blur: d.heatmap.blur,
            min_opacity: d.heatmap.min_opacity,
            max_opacity: d.heatmap.max_opacity,
        };

        let view = PageView {
            with_controls,
            location: &d.location.name,
            locations: &d.locations,
            dates: d
                .available_dates
                .iter()
                .map(|date| DateOption {
                    value: date.format("%Y-%m-%d").to_string(),
                    label: date.format("%B %d, %Y").to_string(),
                    selected: Some(*date) == d.date,
                })
                .collect(),
            date_label: d.date.map(|x| x.format("%B %d, %Y").to_string()),
            notices: &d.notices,
            zone: ZoneView {
                title: zone.title(),
                color: zone.color(),
                css_class: zone.css_class(),
                icon: zone.icon(),
                advisory: zone.advisory(),
            },
            score,
            stars: &d.stars,
            readings: rows,
            conditions: d.weather.as_ref().and_then(|w| w.weather_type.as_deref()),
            heat_heading: match d.heat.origin {
                HeatOrigin::Detections => "🗺️ Fire Risk Heatmap - Satellite Hotspot Detection",
                HeatOrigin::Simulated => "🗺️ Fire Risk Heatmap - Simulated Hotspots",
            },
            hotspot_count: d.hotspot_count,
            weather_json: match &d.weather {
                Some(w) => serde_json::to_string_pretty(w)?,
                None => "No weather data for selected location/date".to_string(),
            },
            map,
        };
        self.render_view(PAGE, &view)
    }
}

/// One-off render with a freshly parsed template set.
pub fn render_page(d: &Dashboard, with_controls: bool) -> Result<String, PageError> {
    PageRenderer::new()?.render(d, with_controls)
}
