//! Catalog filtering — narrows the full catalog by keyword membership
//! against the learner's top strengths, bounding prompt size.
//!
//! The category → keyword map is injected configuration, not a compiled-in
//! singleton, so tests can substitute category sets. Map order is
//! significant: grouping is first-match-wins in that order.

use serde::{Deserialize, Serialize};

use crate::models::catalog::CatalogEntry;
use crate::scoring::strengths::Strength;

/// Minimum entries before uncategorized padding kicks in.
pub const MIN_FILTERED: usize = 30;
/// Padding stops once this many entries are collected.
pub const MAX_FILTERED: usize = 50;

/// Label for entries matching no category.
pub const OTHER_CATEGORY: &str = "OTHER";

/// Ordered category → keyword configuration. Keywords match case-insensitive
/// substrings against an entry's name + description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryKeywordMap {
    categories: Vec<(String, Vec<String>)>,
}

impl CategoryKeywordMap {
    pub fn new(categories: Vec<(String, Vec<String>)>) -> Self {
        Self { categories }
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    fn keywords_for(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(category))
            .map(|(_, keywords)| keywords.as_slice())
    }

    fn category_matches(&self, category: &str, text_lower: &str) -> bool {
        self.keywords_for(category)
            .map(|keywords| keywords.iter().any(|k| text_lower.contains(&k.to_lowercase())))
            .unwrap_or(false)
    }

    /// First matching category in map order, or `None`.
    pub fn first_matching_category(&self, entry: &CatalogEntry) -> Option<&str> {
        let text = entry.search_text().to_lowercase();
        self.categories
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(&k.to_lowercase())))
            .map(|(name, _)| name.as_str())
    }
}

impl Default for CategoryKeywordMap {
    fn default() -> Self {
        let cat = |name: &str, keywords: &[&str]| {
            (
                name.to_string(),
                keywords.iter().map(|k| k.to_string()).collect(),
            )
        };
        Self::new(vec![
            cat(
                "STEM",
                &[
                    "engineering", "science", "technology", "mathematics", "computer",
                    "information", "physics", "chemistry", "biology", "statistics",
                ],
            ),
            cat(
                "ABM",
                &[
                    "business", "accountancy", "accounting", "management", "finance",
                    "marketing", "entrepreneur", "economics",
                ],
            ),
            cat(
                "HUMSS",
                &[
                    "humanities", "social", "communication", "political", "psychology",
                    "education", "journalism", "philosophy", "history",
                ],
            ),
            cat(
                "Scientific Ability",
                &["science", "laboratory", "research", "medical", "health"],
            ),
            cat(
                "Mathematical Ability",
                &["mathematics", "statistics", "actuarial", "data"],
            ),
            cat(
                "Verbal Ability",
                &["communication", "language", "literature", "writing", "media"],
            ),
            cat(
                "Investigative",
                &["research", "analysis", "science", "laboratory"],
            ),
            cat(
                "Artistic",
                &["arts", "design", "music", "creative", "multimedia", "architecture"],
            ),
            cat(
                "Social",
                &["education", "teaching", "nursing", "social work", "community"],
            ),
            cat(
                "Enterprising",
                &["business", "management", "sales", "entrepreneur", "leadership"],
            ),
            cat(
                "Conventional",
                &["accounting", "office", "administration", "clerical", "records"],
            ),
            cat(
                "Realistic",
                &["mechanical", "agriculture", "construction", "technician", "culinary"],
            ),
        ])
    }
}

/// A category heading with its entries, used for prompt readability only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: String,
    pub entries: Vec<CatalogEntry>,
}

/// The narrowed catalog forwarded to the prompt builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilteredCatalog {
    /// All selected entries, first-pass keyword hits before padding.
    pub entries: Vec<CatalogEntry>,
    /// Entries grouped by first matching category (strength categories
    /// first), then `OTHER`.
    pub groups: Vec<CategoryGroup>,
}

/// Filters and categorizes the catalog against the learner's top strengths.
///
/// First pass collects every entry whose text contains a keyword of a
/// strength category. If fewer than `MIN_FILTERED` are collected, unmatched
/// entries are appended in input order until `MAX_FILTERED` or exhaustion.
pub fn filter_catalog(
    catalog: &[CatalogEntry],
    map: &CategoryKeywordMap,
    strengths: &[Strength],
) -> FilteredCatalog {
    let strength_categories: Vec<&str> =
        strengths.iter().map(|s| s.dimension.label()).collect();

    let mut entries: Vec<CatalogEntry> = Vec::new();
    let mut leftover: Vec<&CatalogEntry> = Vec::new();

    for entry in catalog {
        let text = entry.search_text().to_lowercase();
        let hit = strength_categories
            .iter()
            .any(|category| map.category_matches(category, &text));
        if hit {
            entries.push(entry.clone());
        } else {
            leftover.push(entry);
        }
    }

    if entries.len() < MIN_FILTERED {
        for entry in leftover {
            if entries.len() >= MAX_FILTERED {
                break;
            }
            entries.push(entry.clone());
        }
    }

    let groups = group_entries(&entries, map, &strength_categories);

    FilteredCatalog { entries, groups }
}

fn group_entries(
    entries: &[CatalogEntry],
    map: &CategoryKeywordMap,
    strength_categories: &[&str],
) -> Vec<CategoryGroup> {
    // Strength categories first, then the rest of the map, then OTHER
    let mut order: Vec<String> = Vec::new();
    for category in strength_categories {
        if !order.iter().any(|c| c.eq_ignore_ascii_case(category)) {
            order.push(category.to_string());
        }
    }
    for category in map.category_names() {
        if !order.iter().any(|c| c.eq_ignore_ascii_case(category)) {
            order.push(category.to_string());
        }
    }
    order.push(OTHER_CATEGORY.to_string());

    let mut groups: Vec<CategoryGroup> = order
        .into_iter()
        .map(|category| CategoryGroup {
            category,
            entries: Vec::new(),
        })
        .collect();

    for entry in entries {
        let category = map
            .first_matching_category(entry)
            .unwrap_or(OTHER_CATEGORY)
            .to_string();
        if let Some(group) = groups
            .iter_mut()
            .find(|g| g.category.eq_ignore_ascii_case(&category))
        {
            group.entries.push(entry.clone());
        }
    }

    groups.retain(|g| !g.entries.is_empty());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::Dimension;
    use crate::models::catalog::CatalogKind;
    use uuid::Uuid;

    fn entry(name: &str, description: &str) -> CatalogEntry {
        CatalogEntry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: Some(description.to_string()),
            kind: CatalogKind::Program,
        }
    }

    fn strength(dimension: Dimension) -> Strength {
        Strength {
            dimension,
            score: 90.0,
        }
    }

    fn test_map() -> CategoryKeywordMap {
        CategoryKeywordMap::new(vec![
            (
                "STEM".to_string(),
                vec!["engineering".to_string(), "computer".to_string()],
            ),
            ("ABM".to_string(), vec!["business".to_string()]),
        ])
    }

    #[test]
    fn test_keyword_hit_selects_entry() {
        let catalog = vec![
            entry("Computer Science", "programs"),
            entry("Fine Arts", "painting and sculpture"),
        ];
        let filtered = filter_catalog(&catalog, &test_map(), &[strength(Dimension::Stem)]);
        assert_eq!(filtered.entries[0].name, "Computer Science");
    }

    #[test]
    fn test_pads_with_uncategorized_when_below_minimum() {
        // 1 keyword hit + 10 unmatched; below MIN_FILTERED → all 11 selected
        let mut catalog = vec![entry("Computer Science", "cs")];
        for i in 0..10 {
            catalog.push(entry(&format!("Program {i}"), "unrelated"));
        }
        let filtered = filter_catalog(&catalog, &test_map(), &[strength(Dimension::Stem)]);
        assert_eq!(filtered.entries.len(), 11);
        // Keyword hit first, padding keeps input order
        assert_eq!(filtered.entries[0].name, "Computer Science");
        assert_eq!(filtered.entries[1].name, "Program 0");
    }

    #[test]
    fn test_padding_stops_at_max() {
        let mut catalog = Vec::new();
        for i in 0..80 {
            catalog.push(entry(&format!("Program {i}"), "unrelated"));
        }
        let filtered = filter_catalog(&catalog, &test_map(), &[strength(Dimension::Stem)]);
        assert_eq!(filtered.entries.len(), MAX_FILTERED);
    }

    #[test]
    fn test_no_padding_when_enough_keyword_hits() {
        let mut catalog = Vec::new();
        for i in 0..35 {
            catalog.push(entry(&format!("Engineering {i}"), "engineering program"));
        }
        catalog.push(entry("Fine Arts", "painting"));
        let filtered = filter_catalog(&catalog, &test_map(), &[strength(Dimension::Stem)]);
        assert_eq!(filtered.entries.len(), 35);
        assert!(!filtered.entries.iter().any(|e| e.name == "Fine Arts"));
    }

    #[test]
    fn test_grouping_first_match_wins_and_other() {
        let catalog = vec![
            entry("Computer Engineering", "computer and engineering"),
            entry("Business Administration", "business"),
            entry("Fine Arts", "painting"),
        ];
        let filtered = filter_catalog(&catalog, &test_map(), &[strength(Dimension::Stem)]);

        let stem = filtered.groups.iter().find(|g| g.category == "STEM").unwrap();
        assert_eq!(stem.entries.len(), 1);

        let other = filtered
            .groups
            .iter()
            .find(|g| g.category == OTHER_CATEGORY)
            .unwrap();
        assert_eq!(other.entries[0].name, "Fine Arts");
    }

    #[test]
    fn test_strength_categories_grouped_first() {
        let catalog = vec![
            entry("Business Administration", "business"),
            entry("Computer Science", "computer"),
        ];
        // STEM is the strength; ABM matches but must come after
        let filtered = filter_catalog(&catalog, &test_map(), &[strength(Dimension::Stem)]);
        assert_eq!(filtered.groups[0].category, "STEM");
    }

    #[test]
    fn test_default_map_covers_track_dimensions() {
        let map = CategoryKeywordMap::default();
        for label in ["STEM", "ABM", "HUMSS"] {
            assert!(
                map.category_names().any(|c| c == label),
                "default map missing {label}"
            );
        }
    }
}
