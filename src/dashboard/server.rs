//! HTTP dashboard. Every request re-reads the CSV files, so edits show on reload.

use super::{build_dashboard, Dashboard, DashboardRequest, PageError, PageRenderer};
use crate::config::RadarConfig;
use crate::sources::CsvSources;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RadarConfig>,
    pub sources: Arc<CsvSources>,
    pub pages: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(config: RadarConfig) -> Result<Self, PageError> {
        let sources = CsvSources::new(&config.data);
        Ok(Self {
            config: Arc::new(config),
            sources: Arc::new(sources),
            pages: Arc::new(PageRenderer::new()?),
        })
    }

    /// File reads are blocking, so the build runs off the async workers.
    async fn dashboard(&self, request: DashboardRequest) -> Result<Dashboard, (StatusCode, String)> {
        let state = self.clone();
        tokio::task::spawn_blocking(move || {
            build_dashboard(&state.config, &*state.sources, &*state.sources, &request)
        })
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/evaluate", get(evaluate))
        .route("/health", get(health))
        .with_state(state)
        .layer(middleware::from_fn(log_http_request))
}

async fn health() -> &'static str {
    "ok"
}

async fn index(
    State(state): State<AppState>,
    Query(request): Query<DashboardRequest>,
) -> Result<Html<String>, (StatusCode, String)> {
    let dashboard = state.dashboard(request).await?;
    state
        .pages
        .render(&dashboard, true)
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

async fn evaluate(
    State(state): State<AppState>,
    Query(request): Query<DashboardRequest>,
) -> Result<Json<Dashboard>, (StatusCode, String)> {
    state.dashboard(request).await.map(Json)
}

async fn log_http_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    let status = response.status();
    if status.is_server_error() {
        warn!(method = %method, uri = %uri, status = %status, "http request");
    } else {
        info!(method = %method, uri = %uri, status = %status, "http request");
    }
    response
}

/// Serve until `shutdown` resolves.
pub async fn serve(
    listen_addr: &str,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(listen_addr).await?;
    info!(addr = %listen_addr, "dashboard listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("dashboard shutting down");
    Ok(())
}
