//! Recommendation assembly — caps candidates, applies the default
//! confidence policy, and shapes persisted `Recommendation` records.
//!
//! Parser output order is preserved: the oracle's (or the fallback's)
//! ranking is the ranking, never re-sorted by confidence.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::catalog::{CatalogEntry, CatalogKind};
use crate::models::recommendation::{Recommendation, RecommendationCandidate, RecommendationKind};
use crate::recommendation::matcher::match_program;

/// At most this many recommendations per kind per run.
pub const MAX_RECOMMENDATIONS: usize = 5;

const MISSING_EXPLANATION: &str = "Recommended based on your assessment profile.";

/// The single home of default confidence values. Every confidence literal
/// in the engine lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidencePolicy {
    /// Default when the oracle gave no confidence and the match is a career.
    pub career_match: f64,
    /// Default when the oracle gave no confidence and the match is a
    /// program (or nothing matched).
    pub catalog_default: f64,
    /// Deterministic fallback: confidence for index i is base − step·i.
    pub fallback_base: f64,
    pub fallback_step: f64,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            career_match: 75.0,
            catalog_default: 65.0,
            fallback_base: 80.0,
            fallback_step: 5.0,
        }
    }
}

impl ConfidencePolicy {
    /// Confidence for the i-th fallback candidate.
    pub fn fallback_confidence(&self, index: usize) -> f64 {
        self.fallback_base - self.fallback_step * index as f64
    }
}

/// The assembled output of one recommendation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembledRecommendations {
    /// Primary recommendations in parser order, matched against the full
    /// catalog. Null matches are kept, never discarded.
    pub primary: Vec<Recommendation>,
    /// Independent top-5 selection cross-referencing catalog programs only.
    pub program_cross_refs: Vec<Recommendation>,
}

/// Builds persisted recommendation records from parser candidates.
pub fn assemble(
    assessment_result_id: Uuid,
    candidates: &[RecommendationCandidate],
    catalog: &[CatalogEntry],
    policy: &ConfidencePolicy,
) -> AssembledRecommendations {
    let capped = &candidates[..candidates.len().min(MAX_RECOMMENDATIONS)];

    let programs: Vec<CatalogEntry> = catalog
        .iter()
        .filter(|e| e.kind == CatalogKind::Program)
        .cloned()
        .collect();

    let primary = capped
        .iter()
        .map(|candidate| {
            let matched = match_program(&candidate.name, catalog);
            let confidence = candidate.confidence.unwrap_or_else(|| {
                match &matched {
                    Some(m) if m.entry.kind == CatalogKind::Career => policy.career_match,
                    _ => policy.catalog_default,
                }
            });
            build_recommendation(
                assessment_result_id,
                RecommendationKind::TrackRecommendation,
                candidate,
                matched.map(|m| m.entry),
                confidence,
            )
        })
        .collect();

    // Parallel selection: only candidates that resolve to a catalog program
    let program_cross_refs = capped
        .iter()
        .filter_map(|candidate| {
            match_program(&candidate.name, &programs).map(|m| {
                let confidence = candidate.confidence.unwrap_or(policy.catalog_default);
                build_recommendation(
                    assessment_result_id,
                    RecommendationKind::ProgramCrossReference,
                    candidate,
                    Some(m.entry),
                    confidence,
                )
            })
        })
        .take(MAX_RECOMMENDATIONS)
        .collect();

    AssembledRecommendations {
        primary,
        program_cross_refs,
    }
}

fn build_recommendation(
    assessment_result_id: Uuid,
    kind: RecommendationKind,
    candidate: &RecommendationCandidate,
    matched: Option<CatalogEntry>,
    confidence: f64,
) -> Recommendation {
    Recommendation {
        assessment_result_id,
        kind,
        suggested_name: candidate.name.clone(),
        matched_entry_id: matched.as_ref().map(|e| e.id),
        matched_entry_name: matched.map(|e| e.name),
        explanation: candidate
            .explanation
            .clone()
            .unwrap_or_else(|| MISSING_EXPLANATION.to_string()),
        confidence,
    }
}
