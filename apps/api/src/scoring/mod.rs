// Scoring: turns raw per-question answers into a score profile and
// identifies the learner's top-strength dimensions.

pub mod aggregator;
pub mod handlers;
pub mod strengths;
