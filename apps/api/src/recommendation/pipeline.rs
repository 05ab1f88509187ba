//! Recommendation pipeline — orchestrates one full run.
//!
//! Flow: load answers → aggregate → strengths → catalog fetch → filter →
//!       prompt → oracle call → parse → match → assemble → persist.
//!
//! The oracle gets exactly one attempt. A transport failure is recovered by
//! the deterministic catalog fallback and surfaced only as a parse warning;
//! a catalog failure is a hard error, since no fallback exists without a
//! catalog.

use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::CatalogProvider;
use crate::errors::AppError;
use crate::models::assessment::{AnswerRecord, AssessmentAnswerRow, ScoreProfile, SectionResult};
use crate::models::catalog::CatalogEntry;
use crate::models::recommendation::{Recommendation, RecommendationRow};
use crate::oracle::Oracle;
use crate::recommendation::assembler::{assemble, ConfidencePolicy, MAX_RECOMMENDATIONS};
use crate::recommendation::catalog_filter::{filter_catalog, CategoryKeywordMap};
use crate::recommendation::parser::{fallback_candidates, parse_reply, OracleSummary, ParseOutcome};
use crate::recommendation::prompts::{build_recommendation_prompt, RECOMMENDATION_SYSTEM};
use crate::scoring::aggregator::aggregate;
use crate::scoring::strengths::{top_strengths, Strength, DEFAULT_TOP_K};

/// Full pipeline response for one assessment result.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub assessment_result_id: Uuid,
    pub profile: ScoreProfile,
    pub sections: Vec<SectionResult>,
    pub strengths: Vec<Strength>,
    pub summary: Option<OracleSummary>,
    pub recommendations: Vec<Recommendation>,
    pub program_cross_refs: Vec<Recommendation>,
    /// Present when the run degraded to the catalog fallback.
    pub parse_warning: Option<String>,
}

/// Loads the answer records for a completed attempt (scoring input
/// collaborator).
pub async fn load_answers(pool: &PgPool, attempt_id: Uuid) -> Result<Vec<AnswerRecord>, AppError> {
    let rows = sqlx::query_as::<_, AssessmentAnswerRow>(
        "SELECT * FROM assessment_answers WHERE attempt_id = $1 ORDER BY created_at, id",
    )
    .bind(attempt_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(AnswerRecord::from).collect())
}

/// Persists one recommendation, assigning its id.
pub async fn save_recommendation(
    pool: &PgPool,
    rec: &Recommendation,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO recommendations
            (id, assessment_result_id, kind, suggested_name, matched_entry_id,
             matched_entry_name, explanation, confidence)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(id)
    .bind(rec.assessment_result_id)
    .bind(rec.kind)
    .bind(&rec.suggested_name)
    .bind(rec.matched_entry_id)
    .bind(&rec.matched_entry_name)
    .bind(&rec.explanation)
    .bind(rec.confidence)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Returns all persisted recommendations for one assessment result.
pub async fn find_recommendations_for(
    pool: &PgPool,
    assessment_result_id: Uuid,
) -> Result<Vec<RecommendationRow>, AppError> {
    let rows = sqlx::query_as::<_, RecommendationRow>(
        "SELECT * FROM recommendations WHERE assessment_result_id = $1 ORDER BY created_at, id",
    )
    .bind(assessment_result_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Runs the full pipeline for one attempt and persists the results.
pub async fn run_recommendation(
    pool: &PgPool,
    oracle: &dyn Oracle,
    catalog: &dyn CatalogProvider,
    category_map: &CategoryKeywordMap,
    policy: &ConfidencePolicy,
    attempt_id: Uuid,
) -> Result<RecommendationResponse, AppError> {
    let answers = load_answers(pool, attempt_id).await?;
    if answers.is_empty() {
        return Err(AppError::Validation(format!(
            "No answers found for attempt {attempt_id}. Complete the assessment first."
        )));
    }

    let response =
        run_with_answers(&answers, oracle, catalog, category_map, policy, attempt_id).await?;

    for rec in response
        .recommendations
        .iter()
        .chain(&response.program_cross_refs)
    {
        save_recommendation(pool, rec).await?;
    }

    info!(
        "Persisted {} recommendations for result {}",
        response.recommendations.len() + response.program_cross_refs.len(),
        attempt_id
    );

    Ok(response)
}

/// The pipeline core, independent of persistence. Pure apart from the
/// oracle and catalog collaborators.
pub async fn run_with_answers(
    answers: &[AnswerRecord],
    oracle: &dyn Oracle,
    catalog: &dyn CatalogProvider,
    category_map: &CategoryKeywordMap,
    policy: &ConfidencePolicy,
    assessment_result_id: Uuid,
) -> Result<RecommendationResponse, AppError> {
    let scored = aggregate(answers);
    let strengths = top_strengths(&scored.profile, DEFAULT_TOP_K);
    info!(
        "Scored attempt {}: overall {:.2}, top strength {:?}",
        assessment_result_id,
        scored.profile.overall_score,
        strengths.first().map(|s| s.dimension)
    );

    // Catalog failures propagate: no fallback exists without a catalog
    let programs = catalog.list_all_programs().await?;
    let careers = catalog.list_all_careers().await?;

    let filtered = filter_catalog(&programs, category_map, &strengths);
    let prompt = build_recommendation_prompt(
        &scored.profile,
        &scored.sections,
        &strengths,
        &filtered,
    );

    // The fallback takes the first entries of the raw catalog in input
    // order; the keyword-filtered ordering is a prompt concern only
    let outcome = match oracle.generate(&prompt, RECOMMENDATION_SYSTEM).await {
        Ok(raw) => parse_reply(&raw, &programs, MAX_RECOMMENDATIONS, policy),
        Err(e) => {
            warn!("Oracle unavailable for result {assessment_result_id}: {e}");
            ParseOutcome {
                candidates: fallback_candidates(&programs, MAX_RECOMMENDATIONS, policy),
                summary: None,
                warning: Some(format!("oracle unavailable ({e}); using catalog fallback")),
            }
        }
    };

    if let Some(warning) = &outcome.warning {
        warn!("Degraded recommendation run for {assessment_result_id}: {warning}");
    }

    // Match against programs and careers together
    let mut full_catalog: Vec<CatalogEntry> = programs;
    full_catalog.extend(careers);

    let assembled = assemble(assessment_result_id, &outcome.candidates, &full_catalog, policy);

    Ok(RecommendationResponse {
        assessment_result_id,
        profile: scored.profile,
        sections: scored.sections,
        strengths,
        summary: outcome.summary,
        recommendations: assembled.primary,
        program_cross_refs: assembled.program_cross_refs,
        parse_warning: outcome.warning,
    })
}
