pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommendation::handlers as recommendation_handlers;
use crate::scoring::handlers as scoring_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring API
        .route(
            "/api/v1/assessments/:attempt_id/score",
            post(scoring_handlers::handle_score),
        )
        // Recommendation API
        .route(
            "/api/v1/assessments/:attempt_id/recommendations",
            post(recommendation_handlers::handle_recommend),
        )
        .route(
            "/api/v1/results/:result_id/recommendations",
            get(recommendation_handlers::handle_get_recommendations),
        )
        .with_state(state)
}
