use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::analyzers::{coord, greenhouse, health};
use crate::catalog::{Granularity, Molecule};
use crate::config::ClimateSettings;
use crate::output::to_pretty_json;
use crate::services::EnvironmentSource;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn EnvironmentSource>,
    pub climate: Arc<ClimateSettings>,
}

#[derive(Debug, Deserialize)]
pub struct MoleculeParams {
    pub molecule: Molecule,
    #[serde(default)]
    pub range: Granularity,
}

#[derive(Debug, Default, Deserialize)]
pub struct YearBackParams {
    #[serde(default)]
    pub year_back: i64,
}

#[derive(Debug, Deserialize)]
pub struct CoordParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Fractional radii are truncated toward zero.
    pub radius: f64,
}

fn pretty<T: Serialize + ?Sized>(value: &T) -> Result<Response, ApiError> {
    let body = to_pretty_json(value)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn individual_greenhouse(
    State(state): State<AppState>,
    query: Result<Query<MoleculeParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query?;
    let body =
        greenhouse::lookup_molecule(&*state.source, params.molecule, params.range).await?;
    pretty(&body)
}

pub async fn greenhouse_snapshot(
    State(state): State<AppState>,
    query: Result<Query<YearBackParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query?;
    let snapshot = greenhouse::snapshot(&*state.source, params.year_back).await?;
    pretty(&snapshot)
}

pub async fn coordinate(
    State(state): State<AppState>,
    query: Result<Query<CoordParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query?;
    let response = coord::aggregate(
        &*state.source,
        &state.climate,
        params.latitude,
        params.longitude,
        params.radius.trunc() as i64,
        Utc::now().date_naive(),
    )
    .await?;
    pretty(&response)
}

pub async fn health_score(
    State(state): State<AppState>,
    query: Result<Query<YearBackParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query?;
    let score = health::score(
        &*state.source,
        &state.climate,
        params.year_back,
        Utc::now().date_naive(),
    )
    .await?;
    pretty(&score)
}
