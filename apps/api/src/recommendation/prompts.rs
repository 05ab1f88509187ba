//! Prompt construction for the recommendation oracle call.
//!
//! `build_recommendation_prompt` is a pure function of its inputs — same
//! profile, strengths, and filtered catalog always render the same string.

use std::fmt::Write;

use crate::models::assessment::{ScoreProfile, SectionResult};
use crate::recommendation::catalog_filter::FilteredCatalog;
use crate::scoring::strengths::Strength;

/// System prompt — enforces JSON-only output.
pub const RECOMMENDATION_SYSTEM: &str =
    "You are an expert academic and career guidance counselor. \
    You analyze a learner's aptitude profile and recommend academic programs. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Rendering of a dimension with no tagged questions. Absent is not zero.
const NOT_ASSESSED: &str = "not assessed";

/// Task block appended after the profile and catalog. Enumerates the exact
/// required output shape, restricted to catalog names verbatim, with one
/// worked example.
const TASK_BLOCK: &str = r#"YOUR TASK:
1. Produce a "summary" object with "strengths" and "weaknesses" string arrays describing the profile.
2. Produce a "topPrograms" array of objects, each with "program", "explanation", and "confidenceScore" (0-100).
3. Program names MUST be copied verbatim from the program list above — do not invent names.
4. Return strict JSON matching this exact shape, nothing else:

{
  "summary": {
    "strengths": ["Strong scientific ability", "High investigative interest"],
    "weaknesses": ["Low performance in business-related dimensions"]
  },
  "topPrograms": [
    {
      "program": "Computer Science",
      "explanation": "Strong STEM scores and investigative interest align with this program",
      "confidenceScore": 92
    }
  ]
}"#;

/// Renders profile + strengths + filtered catalog into one oracle request.
pub fn build_recommendation_prompt(
    profile: &ScoreProfile,
    sections: &[SectionResult],
    strengths: &[Strength],
    catalog: &FilteredCatalog,
) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "LEARNER APTITUDE PROFILE (overall score: {:.2}/100)\n",
        profile.overall_score
    );

    let _ = writeln!(prompt, "DIMENSION SCORES:");
    for (dimension, score) in profile.dimension_scores() {
        match score {
            Some(s) => {
                let _ = writeln!(prompt, "- {}: {:.2}", dimension.label(), s);
            }
            None => {
                let _ = writeln!(prompt, "- {}: {NOT_ASSESSED}", dimension.label());
            }
        }
    }

    let _ = writeln!(prompt, "\nSECTION RESULTS:");
    for section in sections {
        let _ = writeln!(
            prompt,
            "- section {} ({:?}): {}/{} correct ({:.2}%)",
            section.section_id,
            section.section_type,
            section.correct_answers,
            section.total_questions,
            section.percentage
        );
    }

    let _ = writeln!(prompt, "\nTOP STRENGTHS:");
    for strength in strengths {
        let _ = writeln!(
            prompt,
            "- {}: {:.2}",
            strength.dimension.label(),
            strength.score
        );
    }

    let _ = writeln!(
        prompt,
        "\nAVAILABLE PROGRAMS (choose ONLY from these, names verbatim):"
    );
    for group in &catalog.groups {
        let _ = writeln!(prompt, "\n[{}]", group.category);
        for entry in &group.entries {
            match &entry.description {
                Some(description) => {
                    let _ = writeln!(prompt, "- {}: {}", entry.name, description);
                }
                None => {
                    let _ = writeln!(prompt, "- {}", entry.name);
                }
            }
        }
    }

    let _ = write!(prompt, "\n{TASK_BLOCK}");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::{Dimension, ScoreProfile};
    use crate::models::catalog::{CatalogEntry, CatalogKind};
    use crate::recommendation::catalog_filter::{CategoryGroup, FilteredCatalog};
    use uuid::Uuid;

    fn fixture() -> (ScoreProfile, Vec<Strength>, FilteredCatalog) {
        let profile = ScoreProfile::new(72.5, |d| match d {
            Dimension::Stem => Some(90.0),
            Dimension::Abm => Some(40.0),
            _ => None,
        });
        let strengths = vec![Strength {
            dimension: Dimension::Stem,
            score: 90.0,
        }];
        let entry = CatalogEntry {
            id: Uuid::new_v4(),
            name: "Computer Science".to_string(),
            description: Some("CS program".to_string()),
            kind: CatalogKind::Program,
        };
        let catalog = FilteredCatalog {
            entries: vec![entry.clone()],
            groups: vec![CategoryGroup {
                category: "STEM".to_string(),
                entries: vec![entry],
            }],
        };
        (profile, strengths, catalog)
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let (profile, strengths, catalog) = fixture();
        let a = build_recommendation_prompt(&profile, &[], &strengths, &catalog);
        let b = build_recommendation_prompt(&profile, &[], &strengths, &catalog);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unscored_dimension_renders_not_assessed() {
        let (profile, strengths, catalog) = fixture();
        let prompt = build_recommendation_prompt(&profile, &[], &strengths, &catalog);
        assert!(prompt.contains("HUMSS: not assessed"));
        assert!(!prompt.contains("HUMSS: 0.00"), "absent must not render as zero");
    }

    #[test]
    fn test_prompt_contains_required_output_shape() {
        let (profile, strengths, catalog) = fixture();
        let prompt = build_recommendation_prompt(&profile, &[], &strengths, &catalog);
        assert!(prompt.contains(r#""topPrograms""#));
        assert!(prompt.contains(r#""confidenceScore""#));
        assert!(prompt.contains(r#""strengths""#));
        assert!(prompt.contains("verbatim"));
    }

    #[test]
    fn test_prompt_lists_catalog_by_category() {
        let (profile, strengths, catalog) = fixture();
        let prompt = build_recommendation_prompt(&profile, &[], &strengths, &catalog);
        assert!(prompt.contains("[STEM]"));
        assert!(prompt.contains("- Computer Science: CS program"));
    }

    #[test]
    fn test_prompt_includes_strengths_block() {
        let (profile, strengths, catalog) = fixture();
        let prompt = build_recommendation_prompt(&profile, &[], &strengths, &catalog);
        assert!(prompt.contains("TOP STRENGTHS:"));
        assert!(prompt.contains("STEM: 90.00"));
    }
}
