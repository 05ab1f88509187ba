//! Resilient extraction of structured recommendations from the oracle's
//! free-text reply.
//!
//! Attempt order:
//! 1. extract fenced JSON if a ```json fence is present (first opening
//!    marker, nearest following closing marker);
//! 2. parse the candidate text (or the whole reply) into a typed reply —
//!    field-name variants are absorbed by serde aliases, never by dynamic
//!    map probing;
//! 3. on parse failure or a missing `topPrograms` array, fall back to
//!    deterministic catalog-derived candidates and attach a parse warning.

use serde::{Deserialize, Serialize};

use crate::models::catalog::CatalogEntry;
use crate::models::recommendation::RecommendationCandidate;
use crate::recommendation::assembler::ConfidencePolicy;

const JSON_FENCE_OPEN: &str = "```json";
const FENCE: &str = "```";

const MISSING_DESCRIPTION: &str = "A recognized program from the catalog.";

/// The oracle's reply, as promised by the prompt's task block.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleReply {
    pub summary: Option<OracleSummary>,
    #[serde(rename = "topPrograms")]
    pub top_programs: Option<Vec<OracleProgram>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleSummary {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

/// One element of `topPrograms`. Oracles drift between field names, so
/// aliases accept both observed variants.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleProgram {
    #[serde(alias = "name")]
    pub program: String,
    #[serde(default, alias = "description")]
    pub explanation: Option<String>,
    #[serde(default, rename = "confidenceScore")]
    pub confidence_score: Option<f64>,
}

impl From<OracleProgram> for RecommendationCandidate {
    fn from(p: OracleProgram) -> Self {
        RecommendationCandidate {
            name: p.program,
            explanation: p.explanation,
            confidence: p.confidence_score,
        }
    }
}

/// Outcome of one parse attempt. A warning marks a degraded (fallback)
/// result for observability; it is never an error.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub candidates: Vec<RecommendationCandidate>,
    pub summary: Option<OracleSummary>,
    pub warning: Option<String>,
}

/// Extracts the JSON text between the first ```json opening fence and the
/// nearest following closing fence. A fence that never closes yields the
/// remainder of the text, leaving the parse attempt to decide.
pub fn extract_fenced_json(text: &str) -> Option<&str> {
    let open = text.find(JSON_FENCE_OPEN)?;
    let body_start = open + JSON_FENCE_OPEN.len();
    let body = &text[body_start..];
    match body.find(FENCE) {
        Some(close) => Some(body[..close].trim()),
        None => Some(body.trim()),
    }
}

/// Parses the oracle's raw reply into candidates, falling back to the first
/// `fallback_limit` catalog entries when the reply is malformed or the
/// expected array is absent. Names from a successful parse are preserved
/// verbatim.
pub fn parse_reply(
    raw: &str,
    catalog: &[CatalogEntry],
    fallback_limit: usize,
    policy: &ConfidencePolicy,
) -> ParseOutcome {
    let candidate_text = extract_fenced_json(raw).unwrap_or(raw.trim());

    match serde_json::from_str::<OracleReply>(candidate_text) {
        Ok(reply) => match reply.top_programs {
            Some(programs) if !programs.is_empty() => ParseOutcome {
                candidates: programs.into_iter().map(RecommendationCandidate::from).collect(),
                summary: reply.summary,
                warning: None,
            },
            _ => ParseOutcome {
                candidates: fallback_candidates(catalog, fallback_limit, policy),
                summary: reply.summary,
                warning: Some(
                    "oracle reply parsed but contained no topPrograms array; \
                     using catalog fallback"
                        .to_string(),
                ),
            },
        },
        Err(e) => ParseOutcome {
            candidates: fallback_candidates(catalog, fallback_limit, policy),
            summary: None,
            warning: Some(format!(
                "oracle reply was not valid JSON ({e}); using catalog fallback"
            )),
        },
    }
}

/// Deterministic catalog recommendations: first `limit` entries in input
/// order with strictly decreasing confidence per the policy (80 − 5·i by
/// default; no floor is enforced, callers cap `limit` at 5).
pub fn fallback_candidates(
    catalog: &[CatalogEntry],
    limit: usize,
    policy: &ConfidencePolicy,
) -> Vec<RecommendationCandidate> {
    catalog
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, entry)| RecommendationCandidate {
            name: entry.name.clone(),
            explanation: Some(
                entry
                    .description
                    .clone()
                    .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
            ),
            confidence: Some(policy.fallback_confidence(i)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::CatalogKind;
    use uuid::Uuid;

    fn policy() -> ConfidencePolicy {
        ConfidencePolicy::default()
    }

    fn catalog(n: usize) -> Vec<CatalogEntry> {
        (0..n)
            .map(|i| CatalogEntry {
                id: Uuid::new_v4(),
                name: format!("Program {i}"),
                description: if i % 2 == 0 {
                    Some(format!("Description {i}"))
                } else {
                    None
                },
                kind: CatalogKind::Program,
            })
            .collect()
    }

    #[test]
    fn test_extract_fenced_json_basic() {
        let text = "Here you go:\n```json\n{\"a\": 1}\n```\nHope that helps!";
        assert_eq!(extract_fenced_json(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_extract_uses_nearest_closing_fence() {
        // Two fenced blocks: only the first one's content is extracted
        let text = "```json\n{\"a\": 1}\n```\nand also\n```json\n{\"b\": 2}\n```";
        assert_eq!(extract_fenced_json(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_extract_unclosed_fence_returns_remainder() {
        let text = "```json\n{\"a\": 1}";
        assert_eq!(extract_fenced_json(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_extract_no_fence() {
        assert_eq!(extract_fenced_json("{\"a\": 1}"), None);
    }

    #[test]
    fn test_fenced_reply_with_three_programs() {
        let raw = "```json\n{\"topPrograms\": [\
            {\"program\": \"Computer Science\", \"explanation\": \"fit\", \"confidenceScore\": 92},\
            {\"program\": \"Information Technology\", \"explanation\": \"fit\", \"confidenceScore\": 85},\
            {\"program\": \"Data Science\", \"explanation\": \"fit\", \"confidenceScore\": 80}\
        ]}\n```";
        let outcome = parse_reply(raw, &catalog(5), 5, &policy());
        assert!(outcome.warning.is_none());
        assert_eq!(outcome.candidates.len(), 3);
        assert_eq!(outcome.candidates[0].name, "Computer Science");
        assert_eq!(outcome.candidates[1].name, "Information Technology");
        assert_eq!(outcome.candidates[2].name, "Data Science");
        assert_eq!(outcome.candidates[0].confidence, Some(92.0));
    }

    #[test]
    fn test_unfenced_reply_with_name_alias() {
        let raw = r#"{"topPrograms":[{"name":"Comp Sci","confidenceScore":85}]}"#;
        let outcome = parse_reply(raw, &catalog(5), 5, &policy());
        assert!(outcome.warning.is_none());
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].name, "Comp Sci");
        assert!(outcome.candidates[0].explanation.is_none());
    }

    #[test]
    fn test_description_alias_accepted() {
        let raw = r#"{"topPrograms":[{"program":"Nursing","description":"care track"}]}"#;
        let outcome = parse_reply(raw, &catalog(5), 5, &policy());
        assert_eq!(
            outcome.candidates[0].explanation.as_deref(),
            Some("care track")
        );
        assert!(outcome.candidates[0].confidence.is_none());
    }

    #[test]
    fn test_prose_reply_falls_back_with_warning() {
        let raw = "I think you would do great in engineering! Best of luck.";
        let outcome = parse_reply(raw, &catalog(7), 5, &policy());
        assert!(outcome.warning.is_some());
        assert_eq!(outcome.candidates.len(), 5);
        let confidences: Vec<f64> = outcome
            .candidates
            .iter()
            .map(|c| c.confidence.unwrap())
            .collect();
        assert_eq!(confidences, vec![80.0, 75.0, 70.0, 65.0, 60.0]);
    }

    #[test]
    fn test_valid_json_missing_array_falls_back() {
        let raw = r#"{"summary": {"strengths": ["math"], "weaknesses": []}}"#;
        let outcome = parse_reply(raw, &catalog(3), 5, &policy());
        assert!(outcome.warning.is_some());
        assert_eq!(outcome.candidates.len(), 3);
        let summary = outcome.summary.unwrap();
        assert_eq!(summary.strengths, vec!["math".to_string()]);
    }

    #[test]
    fn test_fallback_uses_catalog_order_and_placeholder() {
        let candidates = fallback_candidates(&catalog(4), 5, &policy());
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0].name, "Program 0");
        // Odd-index entries have no description → generic placeholder
        assert_eq!(
            candidates[1].explanation.as_deref(),
            Some(MISSING_DESCRIPTION)
        );
        assert_eq!(candidates[3].confidence, Some(65.0));
    }

    #[test]
    fn test_fallback_empty_catalog() {
        assert!(fallback_candidates(&[], 5, &policy()).is_empty());
    }

    #[test]
    fn test_summary_survives_successful_parse() {
        let raw = r#"{"summary":{"strengths":["science"],"weaknesses":["business"]},
            "topPrograms":[{"program":"Biology","confidenceScore":70}]}"#;
        let outcome = parse_reply(raw, &catalog(2), 5, &policy());
        assert!(outcome.warning.is_none());
        assert_eq!(outcome.summary.unwrap().weaknesses, vec!["business".to_string()]);
    }
}
