//! Strength profiling — ranks scored dimensions and selects the top K.

use serde::{Deserialize, Serialize};

use crate::models::assessment::{Dimension, ScoreProfile};

/// Default number of strengths used for catalog filtering and the prompt.
pub const DEFAULT_TOP_K: usize = 3;

/// A dimension the learner scored well on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strength {
    pub dimension: Dimension,
    pub score: f64,
}

/// Returns the top `k` scored dimensions, descending by score. The sort is
/// stable, so ties keep the profile's canonical dimension order. Dimensions
/// with no score are excluded — "not assessed" is never a strength.
pub fn top_strengths(profile: &ScoreProfile, k: usize) -> Vec<Strength> {
    let mut ranked: Vec<Strength> = profile
        .dimension_scores()
        .iter()
        .filter_map(|&(dimension, score)| score.map(|score| Strength { dimension, score }))
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(k);
    ranked
}
