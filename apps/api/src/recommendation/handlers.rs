//! Axum route handlers for the Recommendation API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::recommendation::RecommendationRow;
use crate::recommendation::pipeline::{
    find_recommendations_for, run_recommendation, RecommendationResponse,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StoredRecommendationsResponse {
    pub assessment_result_id: Uuid,
    pub recommendations: Vec<RecommendationRow>,
}

/// POST /api/v1/assessments/:attempt_id/recommendations
///
/// Runs the full pipeline: score → strengths → catalog filter → prompt →
/// oracle → parse → match → assemble → persist. Degrades to the catalog
/// fallback (with a `parse_warning`) when the oracle fails; returns a hard
/// error only when answers or the catalog are unavailable.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Path(attempt_id): Path<Uuid>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let response = run_recommendation(
        &state.db,
        state.oracle.as_ref(),
        state.catalog.as_ref(),
        &state.category_map,
        &state.confidence_policy,
        attempt_id,
    )
    .await?;

    Ok(Json(response))
}

/// GET /api/v1/results/:result_id/recommendations
///
/// Returns all persisted recommendations for one assessment result.
pub async fn handle_get_recommendations(
    State(state): State<AppState>,
    Path(result_id): Path<Uuid>,
) -> Result<Json<StoredRecommendationsResponse>, AppError> {
    let recommendations = find_recommendations_for(&state.db, result_id).await?;

    Ok(Json(StoredRecommendationsResponse {
        assessment_result_id: result_id,
        recommendations,
    }))
}
