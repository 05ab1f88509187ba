use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Transient candidate extracted from the oracle reply (or the fallback).
/// Exists only within a single recommendation run; never persisted directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationCandidate {
    pub name: String,
    pub explanation: Option<String>,
    /// Absent means "oracle supplied none" — the assembler applies the
    /// default policy, never this type.
    pub confidence: Option<f64>,
}

/// Which selection a persisted recommendation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Primary oracle-ranked (or fallback) recommendation.
    TrackRecommendation,
    /// Parallel top-5 selection reserved for catalog program cross-referencing.
    ProgramCrossReference,
}

/// A persisted recommendation. `suggested_name` keeps the oracle's wording
/// verbatim for audit even when a catalog match exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub assessment_result_id: Uuid,
    pub kind: RecommendationKind,
    pub suggested_name: String,
    pub matched_entry_id: Option<Uuid>,
    pub matched_entry_name: Option<String>,
    pub explanation: String,
    pub confidence: f64,
}

/// Row shape for the `recommendations` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecommendationRow {
    pub id: Uuid,
    pub assessment_result_id: Uuid,
    pub kind: RecommendationKind,
    pub suggested_name: String,
    pub matched_entry_id: Option<Uuid>,
    pub matched_entry_name: Option<String>,
    pub explanation: String,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_confidence_optional_in_json() {
        let json = r#"{"name": "Computer Science", "explanation": null}"#;
        let candidate: RecommendationCandidate = serde_json::from_str(json).unwrap();
        assert!(candidate.confidence.is_none());
    }

    #[test]
    fn test_kind_serde_snake_case() {
        let json = serde_json::to_string(&RecommendationKind::ProgramCrossReference).unwrap();
        assert_eq!(json, r#""program_cross_reference""#);
    }
}
