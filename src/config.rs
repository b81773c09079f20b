//! Dashboard configuration. Every section has defaults so the binary runs without a file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Input CSV files
    pub data: DataConfig,
    /// Zone thresholds
    pub risk: RiskConfig,
    /// Static location table (historical fire probability, baselines)
    pub locations: Vec<LocationConfig>,
    /// Heatmap simulation and styling
    pub heatmap: HeatmapConfig,
    /// Output file / HTTP server
    pub dashboard: DashboardConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// NASA FIRMS style detections
    pub hotspots_csv: PathBuf,
    /// Weather observations
    pub weather_csv: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Scores at or above this are MODERATE (0.0–10.0)
    pub moderate_threshold: f64,
    /// Scores at or above this are DANGER
    pub danger_threshold: f64,
}

/// One entry of the location table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    /// Prior fire incidence, 0.0–1.0
    pub historical_fire_probability: f64,
    /// Used for any reading the weather log does not carry
    pub baseline: BaselineReadings,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineReadings {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub vegetation_dryness: f64,
    #[serde(default)]
    pub precipitation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Seed for simulated hotspots; fixed so a page reload shows the same map
    pub seed: u64,
    /// Max lat/lon offset of simulated points (degrees)
    pub spread_deg: f64,
    pub radius: u32,
    pub blur: u32,
    pub min_opacity: f64,
    pub max_opacity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Where the one-shot render writes the page
    pub output_path: PathBuf,
    /// Serve over HTTP instead of rendering once (e.g. "127.0.0.1:8501")
    pub listen_addr: Option<String>,
    /// Location shown when none is requested
    pub default_location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

fn default_zoom() -> u8 {
    9
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            risk: RiskConfig::default(),
            locations: default_locations(),
            heatmap: HeatmapConfig::default(),
            dashboard: DashboardConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            hotspots_csv: PathBuf::from("data/nasa_firms_data.csv"),
            weather_csv: PathBuf::from("data/weather_data.csv"),
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            moderate_threshold: 4.0,
            danger_threshold: 7.0,
        }
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            spread_deg: 0.3,
            radius: 25,
            blur: 20,
            min_opacity: 0.3,
            max_opacity: 0.8,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("riskradar.html"),
            listen_addr: None,
            default_location: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

fn location(
    name: &str,
    latitude: f64,
    longitude: f64,
    historical_fire_probability: f64,
    baseline: BaselineReadings,
) -> LocationConfig {
    LocationConfig {
        name: name.to_string(),
        latitude,
        longitude,
        zoom: default_zoom(),
        historical_fire_probability,
        baseline,
    }
}

/// Reference table shipped with the dashboard.
pub fn default_locations() -> Vec<LocationConfig> {
    vec![
        location(
            "California, USA",
            36.7783,
            -119.4179,
            0.85,
            BaselineReadings {
                temperature: 38.0,
                humidity: 25.0,
                wind_speed: 20.0,
                vegetation_dryness: 0.8,
                precipitation: 0.0,
            },
        ),
        location(
            "Patiala, Punjab",
            30.3398,
            76.3869,
            0.3,
            BaselineReadings {
                temperature: 35.0,
                humidity: 45.0,
                wind_speed: 12.0,
                vegetation_dryness: 0.5,
                precipitation: 1.5,
            },
        ),
        location(
            "Dehradun, Uttarakhand",
            30.3165,
            78.0322,
            0.7,
            BaselineReadings {
                temperature: 32.0,
                humidity: 55.0,
                wind_speed: 8.0,
                vegetation_dryness: 0.6,
                precipitation: 2.0,
            },
        ),
        location(
            "Nagpur, Maharashtra",
            21.1458,
            79.0882,
            0.5,
            BaselineReadings {
                temperature: 38.0,
                humidity: 30.0,
                wind_speed: 15.0,
                vegetation_dryness: 0.7,
                precipitation: 0.5,
            },
        ),
        location(
            "Shimla, Himachal Pradesh",
            31.1048,
            77.1734,
            0.8,
            BaselineReadings {
                temperature: 28.0,
                humidity: 60.0,
                wind_speed: 10.0,
                vegetation_dryness: 0.4,
                precipitation: 3.0,
            },
        ),
    ]
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RadarConfig {
    /// Read from a JSON file. A missing file yields the defaults.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from JSON file if present and valid; otherwise return default
    pub fn load(path: &Path) -> Self {
        Self::read(path).unwrap_or_default()
    }

    /// Case-insensitive lookup in the location table.
    pub fn location(&self, name: &str) -> Option<&LocationConfig> {
        let name = name.trim();
        self.locations
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
    }

    /// Requested location, else the configured default, else the first table entry.
    pub fn resolve_location(&self, requested: Option<&str>) -> Option<&LocationConfig> {
        requested
            .and_then(|n| self.location(n))
            .or_else(|| {
                self.dashboard
                    .default_location
                    .as_deref()
                    .and_then(|n| self.location(n))
            })
            .or_else(|| self.locations.first())
    }
}
