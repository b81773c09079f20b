//! RiskRadar entrypoint. Renders the dashboard once to an HTML file, or serves it
//! over HTTP when `dashboard.listen_addr` is configured.

use riskradar::{
    config::RadarConfig,
    dashboard::{self, AppState, DashboardRequest},
    logging::{EvaluationLog, StructuredLogger},
    sources::CsvSources,
};
use std::path::PathBuf;
use tracing::{info, warn};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn render_once(config: &RadarConfig) -> Result<(), BoxError> {
    let sources = CsvSources::new(&config.data);
    let request = DashboardRequest {
        location: env_opt("RISKRADAR_LOCATION"),
        date: env_opt("RISKRADAR_DATE"),
    };
    let board = dashboard::build_dashboard(config, &sources, &sources, &request)?;
    let html = dashboard::render_page(&board, false)?;

    let out = &config.dashboard.output_path;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out, html)?;
    info!(path = %out.display(), "dashboard written");

    let mut summary = EvaluationLog::from_dashboard(&board);
    summary.output = Some(out.display().to_string());
    StructuredLogger::emit_json(&summary, &mut std::io::stdout().lock());
    Ok(())
}

fn serve(config: RadarConfig, listen_addr: String) -> Result<(), BoxError> {
    let (stop_tx, mut stop_rx) = tokio::sync::watch::channel(false);
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(true);
    })?;
    let shutdown = async move {
        let _ = stop_rx.changed().await;
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    info!(addr = %listen_addr, "serve mode (Ctrl+C to stop)");
    runtime.block_on(dashboard::serve(&listen_addr, AppState::new(config)?, shutdown))?;
    Ok(())
}

fn main() -> Result<(), BoxError> {
    let config_path = std::env::var("RISKRADAR_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));
    let (config, config_error) = match RadarConfig::read(&config_path) {
        Ok(c) => (c, None),
        Err(e) => (RadarConfig::default(), Some(e)),
    };

    StructuredLogger::init(config.log.json, &config.log.level);
    if let Some(e) = config_error {
        warn!(error = %e, "config not usable; running with defaults");
    }
    info!(
        config = %config_path.display(),
        locations = config.locations.len(),
        "RiskRadar starting"
    );

    match config.dashboard.listen_addr.clone() {
        Some(addr) => serve(config, addr),
        None => render_once(&config),
    }
}
