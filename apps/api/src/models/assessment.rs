#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Section type tag — fixed enumeration of assessment sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    GsaSubtest,
    AcademicTrack,
    OtherTrack,
    InterestArea,
}

/// A named scoring axis. Declaration order is the canonical stable order
/// used for tie-breaking and for prompt rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    // GSA subtests
    ScientificAbility,
    ReadingComprehension,
    VerbalAbility,
    MathematicalAbility,
    LogicalReasoning,
    // Academic tracks
    Stem,
    Abm,
    Humss,
    Gas,
    // Other tracks
    Tvl,
    SportsTrack,
    ArtsDesign,
    // RIASEC interest areas
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl Dimension {
    /// All dimensions in canonical order.
    pub const ALL: [Dimension; 18] = [
        Dimension::ScientificAbility,
        Dimension::ReadingComprehension,
        Dimension::VerbalAbility,
        Dimension::MathematicalAbility,
        Dimension::LogicalReasoning,
        Dimension::Stem,
        Dimension::Abm,
        Dimension::Humss,
        Dimension::Gas,
        Dimension::Tvl,
        Dimension::SportsTrack,
        Dimension::ArtsDesign,
        Dimension::Realistic,
        Dimension::Investigative,
        Dimension::Artistic,
        Dimension::Social,
        Dimension::Enterprising,
        Dimension::Conventional,
    ];

    /// Human-readable label used in prompts and category matching.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::ScientificAbility => "Scientific Ability",
            Dimension::ReadingComprehension => "Reading Comprehension",
            Dimension::VerbalAbility => "Verbal Ability",
            Dimension::MathematicalAbility => "Mathematical Ability",
            Dimension::LogicalReasoning => "Logical Reasoning",
            Dimension::Stem => "STEM",
            Dimension::Abm => "ABM",
            Dimension::Humss => "HUMSS",
            Dimension::Gas => "GAS",
            Dimension::Tvl => "TVL",
            Dimension::SportsTrack => "Sports Track",
            Dimension::ArtsDesign => "Arts and Design",
            Dimension::Realistic => "Realistic",
            Dimension::Investigative => "Investigative",
            Dimension::Artistic => "Artistic",
            Dimension::Social => "Social",
            Dimension::Enterprising => "Enterprising",
            Dimension::Conventional => "Conventional",
        }
    }
}

/// One answered question from a completed assessment attempt.
/// Supplied by the scoring-input collaborator (`assessment_answers` table).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnswerRecord {
    pub question_id: Uuid,
    pub section_id: Uuid,
    pub section_type: SectionType,
    pub dimension: Dimension,
    pub correct: bool,
}

/// Raw correct/total counts for one section, with the derived percentage.
/// Created during scoring, never mutated after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResult {
    pub section_id: Uuid,
    pub section_type: SectionType,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub percentage: f64,
}

/// Multi-dimensional score profile for one completed attempt.
///
/// A dimension with no tagged questions scores `None` — "not assessed" is
/// distinct from "scored zero" everywhere downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreProfile {
    pub overall_score: f64,
    scores: Vec<(Dimension, Option<f64>)>,
}

impl ScoreProfile {
    /// Builds a profile from per-dimension scores. Dimensions absent from
    /// `scores` are recorded as `None`.
    pub fn new(overall_score: f64, scores: impl Fn(Dimension) -> Option<f64>) -> Self {
        Self {
            overall_score,
            scores: Dimension::ALL.iter().map(|&d| (d, scores(d))).collect(),
        }
    }

    pub fn score(&self, dimension: Dimension) -> Option<f64> {
        self.scores
            .iter()
            .find(|(d, _)| *d == dimension)
            .and_then(|(_, s)| *s)
    }

    /// All dimension scores in canonical order.
    pub fn dimension_scores(&self) -> &[(Dimension, Option<f64>)] {
        &self.scores
    }
}

/// Row shape for the `assessment_answers` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentAnswerRow {
    pub id: Uuid,
    pub attempt_id: Uuid,
    pub question_id: Uuid,
    pub section_id: Uuid,
    pub section_type: SectionType,
    pub dimension: Dimension,
    pub correct: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AssessmentAnswerRow> for AnswerRecord {
    fn from(row: AssessmentAnswerRow) -> Self {
        AnswerRecord {
            question_id: row.question_id,
            section_id: row.section_id,
            section_type: row.section_type,
            dimension: row.dimension,
            correct: row.correct,
        }
    }
}
