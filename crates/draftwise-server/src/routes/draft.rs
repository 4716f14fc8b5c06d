//! Draft advisor endpoints — meta report, assignment, and recommendations.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use draftwise_core::advisor::{
    AssignRequest, AssignResponse, MetaReport, RecommendRequest, RecommendResponse,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the meta endpoint.
#[derive(Deserialize)]
pub struct MetaQuery {
    /// Force a knowledge-base rebuild.
    #[serde(default)]
    pub refresh: bool,
}

/// Query parameters for the assign/recommend endpoints.
#[derive(Deserialize)]
pub struct DebugQuery {
    /// Include debug payloads in the response (ORs with the body flag).
    #[serde(default)]
    pub debug: bool,
}

/// `GET /draft/meta` — sequence script, role-pool summary, scoring contract.
pub async fn meta(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MetaQuery>,
) -> Result<Json<MetaReport>, ApiError> {
    let report = state.advisor.meta(query.refresh)?;
    Ok(Json(report))
}

/// `POST /draft/assign` — solve one side's role composition.
pub async fn assign(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DebugQuery>,
    Json(request): Json<AssignRequest>,
) -> Result<Json<AssignResponse>, ApiError> {
    let response = state.advisor.assign(&request, query.debug)?;
    Ok(Json(response))
}

/// `POST /draft/recommend` — rank candidates for the current action.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DebugQuery>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let response = state.advisor.recommend(&request, query.debug)?;
    Ok(Json(response))
}
