//! Route handlers. Each handler performs one gateway call and maps failures
//! through the configured [`StatusMapping`].

use crate::config::StatusMapping;
use crate::core::gateway::Gateway;
use crate::core::{Driver, LapComparison, Race};
use crate::server::error::ApiError;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub status_mapping: StatusMapping,
}

impl AppState {
    pub fn new(gateway: Arc<Gateway>, status_mapping: StatusMapping) -> Self {
        Self {
            gateway,
            status_mapping,
        }
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
}

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/years", get(years_handler))
        .route("/races/:year", get(races_handler))
        .route("/drivers/:year/:round", get(drivers_handler))
        .route(
            "/lap-times/:year/:round/:driver1/:driver2",
            get(lap_times_handler),
        )
        .with_state(state)
}

async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "F1 Lap Time Analyzer API",
    })
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.gateway.provider_name().to_string(),
    })
}

async fn years_handler(State(state): State<AppState>) -> ApiResult<Vec<i32>> {
    state
        .gateway
        .list_supported_years()
        .map(Json)
        .map_err(|e| ApiError::from_gateway(e, state.status_mapping))
}

async fn races_handler(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> ApiResult<Vec<Race>> {
    state
        .gateway
        .list_races(year)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_gateway(e, state.status_mapping))
}

async fn drivers_handler(
    State(state): State<AppState>,
    Path((year, round)): Path<(i32, u32)>,
) -> ApiResult<Vec<Driver>> {
    state
        .gateway
        .list_drivers(year, round)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_gateway(e, state.status_mapping))
}

async fn lap_times_handler(
    State(state): State<AppState>,
    Path((year, round, driver1, driver2)): Path<(i32, u32, String, String)>,
) -> ApiResult<LapComparison> {
    state
        .gateway
        .compare_lap_times(year, round, &driver1, &driver2)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_gateway(e, state.status_mapping))
}
