//! Score aggregation — per-question answers in, immutable `ScoreProfile` out.
//!
//! Pure and idempotent: the same answer slice always yields the same result.
//! A dimension with no tagged questions scores `None`, never 0 — downstream
//! consumers must be able to tell "absent" from "scored zero".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::assessment::{AnswerRecord, Dimension, ScoreProfile, SectionResult};

/// Stored numeric precision for percentages: two decimal places.
const PRECISION: f64 = 100.0;

/// Result of aggregating one completed attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredAttempt {
    pub profile: ScoreProfile,
    pub sections: Vec<SectionResult>,
}

/// Aggregates raw answer records into a score profile and section results.
pub fn aggregate(answers: &[AnswerRecord]) -> ScoredAttempt {
    let profile = compute_profile(answers);
    let sections = compute_sections(answers);
    ScoredAttempt { profile, sections }
}

fn compute_profile(answers: &[AnswerRecord]) -> ScoreProfile {
    // (correct, total) per dimension
    let mut counts: HashMap<Dimension, (u32, u32)> = HashMap::new();
    for answer in answers {
        let entry = counts.entry(answer.dimension).or_insert((0, 0));
        entry.1 += 1;
        if answer.correct {
            entry.0 += 1;
        }
    }

    let total = answers.len() as u32;
    let correct = answers.iter().filter(|a| a.correct).count() as u32;
    let overall = percentage(correct, total).unwrap_or(0.0);

    ScoreProfile::new(overall, |dimension| {
        counts
            .get(&dimension)
            .and_then(|&(correct, total)| percentage(correct, total))
    })
}

fn compute_sections(answers: &[AnswerRecord]) -> Vec<SectionResult> {
    // Preserve first-seen section order
    let mut order: Vec<Uuid> = Vec::new();
    let mut counts: HashMap<Uuid, SectionResult> = HashMap::new();

    for answer in answers {
        let result = counts.entry(answer.section_id).or_insert_with(|| {
            order.push(answer.section_id);
            SectionResult {
                section_id: answer.section_id,
                section_type: answer.section_type,
                correct_answers: 0,
                total_questions: 0,
                percentage: 0.0,
            }
        });
        result.total_questions += 1;
        if answer.correct {
            result.correct_answers += 1;
        }
    }

    order
        .into_iter()
        .filter_map(|id| counts.remove(&id))
        .map(|mut result| {
            result.percentage =
                percentage(result.correct_answers, result.total_questions).unwrap_or(0.0);
            result
        })
        .collect()
}

/// correct/total × 100 rounded to the stored precision; `None` when there is
/// nothing to score (never divides by zero).
fn percentage(correct: u32, total: u32) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let pct = correct as f64 / total as f64 * 100.0;
    Some((pct * PRECISION).round() / PRECISION)
}
