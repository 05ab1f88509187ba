//! Axum route handlers for the Scoring API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::assessment::{ScoreProfile, SectionResult};
use crate::recommendation::pipeline::load_answers;
use crate::scoring::aggregator::aggregate;
use crate::scoring::strengths::{top_strengths, Strength, DEFAULT_TOP_K};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub attempt_id: Uuid,
    pub profile: ScoreProfile,
    pub sections: Vec<SectionResult>,
    pub strengths: Vec<Strength>,
}

/// POST /api/v1/assessments/:attempt_id/score
///
/// Scores a completed attempt without calling the oracle. Useful for
/// previewing the profile before requesting recommendations.
pub async fn handle_score(
    State(state): State<AppState>,
    Path(attempt_id): Path<Uuid>,
) -> Result<Json<ScoreResponse>, AppError> {
    let answers = load_answers(&state.db, attempt_id).await?;
    if answers.is_empty() {
        return Err(AppError::NotFound(format!(
            "No answers found for attempt {attempt_id}"
        )));
    }

    let scored = aggregate(&answers);
    let strengths = top_strengths(&scored.profile, DEFAULT_TOP_K);

    Ok(Json(ScoreResponse {
        attempt_id,
        profile: scored.profile,
        sections: scored.sections,
        strengths,
    }))
}
