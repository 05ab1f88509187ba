//! Program matching — reconciles an oracle-suggested program name against
//! the canonical catalog via combined string-similarity scoring.

use serde::{Deserialize, Serialize};

use crate::models::catalog::CatalogEntry;
use crate::recommendation::similarity::{jaccard_words, levenshtein_similarity};

/// A match is accepted only when its combined score exceeds this.
pub const MATCH_THRESHOLD: f64 = 0.4;

const EXACT_WEIGHT: f64 = 0.6;
const SUBSTRING_WEIGHT: f64 = 0.2;
// Substring containment scores 0.8, not 1.0 — a containment hit is weaker
// evidence than exact equality.
const SUBSTRING_SCALE: f64 = 0.8;
const NAME_JACCARD_WEIGHT: f64 = 0.1;
const LEVENSHTEIN_WEIGHT: f64 = 0.1;
const DESCRIPTION_BOOST_WEIGHT: f64 = 0.1;

/// The accepted catalog match for a suggested name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramMatch {
    pub entry: CatalogEntry,
    pub score: f64,
}

/// True when every token of one name is a non-empty prefix of the
/// corresponding token of the other, e.g. "comp sci" / "computer science".
/// Oracle replies abbreviate this way often enough that treating it as
/// anything weaker than equality leaves obvious matches below the threshold.
fn is_prefix_abbreviation(a: &str, b: &str) -> bool {
    let a_tokens: Vec<&str> = a.split_whitespace().collect();
    let b_tokens: Vec<&str> = b.split_whitespace().collect();
    if a_tokens.is_empty() || a_tokens.len() != b_tokens.len() {
        return false;
    }
    a_tokens
        .iter()
        .zip(&b_tokens)
        .all(|(x, y)| x.starts_with(y) || y.starts_with(x))
}

/// Combined similarity between a suggested name and one catalog entry.
pub fn match_score(suggested: &str, entry: &CatalogEntry) -> f64 {
    let suggested = suggested.trim().to_lowercase();
    let name = entry.name.trim().to_lowercase();

    let exact = if suggested == name || is_prefix_abbreviation(&suggested, &name) {
        1.0
    } else {
        0.0
    };
    let substring = if !suggested.is_empty()
        && !name.is_empty()
        && (suggested.contains(&name) || name.contains(&suggested))
    {
        SUBSTRING_SCALE
    } else {
        0.0
    };

    let mut score = EXACT_WEIGHT * exact
        + SUBSTRING_WEIGHT * substring
        + NAME_JACCARD_WEIGHT * jaccard_words(&suggested, &name)
        + LEVENSHTEIN_WEIGHT * levenshtein_similarity(&suggested, &name);

    if let Some(description) = &entry.description {
        score += DESCRIPTION_BOOST_WEIGHT * jaccard_words(&suggested, &description.to_lowercase());
    }

    score
}

/// Finds the best catalog entry for a suggested name, or `None` when no
/// entry clears the acceptance threshold. An unresolvable match is a valid
/// terminal state, not an error.
pub fn match_program(suggested: &str, catalog: &[CatalogEntry]) -> Option<ProgramMatch> {
    catalog
        .iter()
        .map(|entry| ProgramMatch {
            entry: entry.clone(),
            score: match_score(suggested, entry),
        })
        .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
        .filter(|best| best.score > MATCH_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::CatalogKind;
    use uuid::Uuid;

    fn entry(name: &str, description: Option<&str>) -> CatalogEntry {
        CatalogEntry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.map(|d| d.to_string()),
            kind: CatalogKind::Program,
        }
    }

    #[test]
    fn test_exact_match_scores_high() {
        let e = entry("Computer Science", Some("CS program"));
        let score = match_score("Computer Science", &e);
        assert!(score > 0.9, "exact match scored {score}");
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let e = entry("Computer Science", None);
        assert_eq!(
            match_score("computer science", &e),
            match_score("Computer Science", &e)
        );
    }

    #[test]
    fn test_substring_containment_contributes() {
        let contained = entry("Computer Science", None);
        let unrelated = entry("Fine Arts", None);
        let score = match_score("Computer", &contained);
        assert!(score > match_score("Computer", &unrelated));
        // Containment alone is weak evidence and stays below the gate
        assert!(score < MATCH_THRESHOLD, "scored {score}");
    }

    #[test]
    fn test_unrelated_name_rejected() {
        let catalog = vec![entry("Computer Science", Some("CS program"))];
        assert!(match_program("Culinary Arts", &catalog).is_none());
    }

    #[test]
    fn test_never_matches_at_or_below_threshold() {
        let catalog = vec![
            entry("Computer Science", None),
            entry("Business Administration", None),
            entry("Fine Arts", None),
        ];
        for suggested in ["xyzzy", "q", "underwater basket weaving", ""] {
            if let Some(m) = match_program(suggested, &catalog) {
                assert!(
                    m.score > MATCH_THRESHOLD,
                    "accepted {suggested:?} at score {}",
                    m.score
                );
            }
        }
    }

    #[test]
    fn test_best_entry_wins() {
        let catalog = vec![
            entry("Business Administration", None),
            entry("Computer Science", None),
        ];
        let m = match_program("Computer Science", &catalog).unwrap();
        assert_eq!(m.entry.name, "Computer Science");
    }

    #[test]
    fn test_description_boost_breaks_ties() {
        let plain = entry("Information Systems", None);
        let described = entry("Information Systems", Some("systems and information careers"));
        let suggested = "information systems";
        assert!(match_score(suggested, &described) > match_score(suggested, &plain));
    }

    #[test]
    fn test_abbreviated_name_matches() {
        // "Comp Sci" abbreviates "Computer Science" token by token
        let catalog = vec![
            entry("Computer Science", Some("CS program")),
            entry("Business Administration", None),
        ];
        let m = match_program("Comp Sci", &catalog).unwrap();
        assert_eq!(m.entry.name, "Computer Science");
        assert!(m.score > MATCH_THRESHOLD);
    }

    #[test]
    fn test_abbreviation_requires_matching_token_count() {
        // One token against two gets no equality credit
        let e = entry("Computer Science", None);
        assert!(match_score("Comp", &e) < MATCH_THRESHOLD);
    }

    #[test]
    fn test_empty_catalog_matches_nothing() {
        assert!(match_program("Computer Science", &[]).is_none());
    }
}
