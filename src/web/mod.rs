//! JSON/CSV HTTP API over the series generator.

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    codec,
    error::GrowthError,
    export::{self, SeriesReport},
    params::GrowthParameters,
    presets::{Preset, PresetCatalog},
    simulation::Simulation,
};

pub struct WebServerConfig {
    pub defaults: GrowthParameters,
    pub catalog: PresetCatalog,
    pub max_time_span: u32,
    pub host: String,
    pub port: u16,
}

/// Read-only state shared by every request.
pub struct AppState {
    pub defaults: GrowthParameters,
    pub catalog: PresetCatalog,
    /// Requests asking for more years than this are rejected.
    pub max_time_span: u32,
}

#[derive(Serialize)]
pub struct PresetEntry {
    pub name: String,
    pub description: Option<String>,
    pub query: String,
}

impl From<&Preset> for PresetEntry {
    fn from(preset: &Preset) -> Self {
        Self {
            name: preset.name.clone(),
            description: preset.description.clone(),
            query: preset.query(),
        }
    }
}

#[derive(Debug)]
pub struct ApiError(GrowthError);

impl From<GrowthError> for ApiError {
    fn from(value: GrowthError) -> Self {
        ApiError(value)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            GrowthError::UnknownPreset(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.0.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/series", get(series))
        .route("/api/series.csv", get(series_csv))
        .route("/api/presets", get(list_presets))
        .route("/api/presets/:name", get(preset_series))
        .with_state(state)
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig {
        defaults,
        catalog,
        max_time_span,
        host,
        port,
    } = config;

    let state = Arc::new(AppState {
        defaults,
        catalog,
        max_time_span,
    });
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("Invalid listen address {host}:{port}"))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "serving population growth API (Ctrl+C to stop)");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down API server");
}

fn simulate(state: &AppState, query: Option<&str>) -> Result<Simulation, ApiError> {
    let params = codec::decode(&state.defaults, query.unwrap_or_default());
    let checked = if params.time_span > state.max_time_span {
        Err(GrowthError::InvalidParameter {
            name: "time_span",
            value: f64::from(params.time_span),
        })
    } else {
        Simulation::new(params)
    };
    checked.map_err(|err| {
        warn!(%err, ?query, "rejected series request");
        ApiError::from(err)
    })
}

pub async fn series(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<SeriesReport>, ApiError> {
    let sim = simulate(&state, query.as_deref())?;
    Ok(Json(sim.report()))
}

pub async fn series_csv(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let sim = simulate(&state, query.as_deref())?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"population.csv\"",
            ),
        ],
        export::to_csv(sim.points()),
    )
        .into_response())
}

pub async fn list_presets(State(state): State<Arc<AppState>>) -> Json<Vec<PresetEntry>> {
    Json(state.catalog.presets.iter().map(PresetEntry::from).collect())
}

pub async fn preset_series(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<SeriesReport>, ApiError> {
    let preset = state.catalog.get(&name)?;
    let sim = Simulation::new(preset.parameters())?;
    Ok(Json(sim.report()))
}
