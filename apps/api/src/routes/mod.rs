pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::contact::handlers as contact;
use crate::matching::handlers as matching;
use crate::onboarding::handlers as onboarding;
use crate::profiles::handlers as profiles;
use crate::safety::handlers as safety;
use crate::skills::handlers as skills;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Skill understanding
        .route("/api/v1/skills/resolve", post(skills::handle_resolve))
        .route("/api/v1/skills/dialog", post(skills::handle_dialog))
        .route("/api/v1/skills/gaps", get(skills::handle_gaps))
        // Onboarding and profiles
        .route(
            "/api/v1/onboarding/step",
            post(onboarding::handle_onboarding_step),
        )
        .route("/api/v1/workers/:id", get(profiles::handle_get_worker))
        .route(
            "/api/v1/workers/:id/recommendations",
            get(profiles::handle_recommendations),
        )
        .route("/api/v1/finders/:id", get(profiles::handle_get_finder))
        // Matching, contact gate, ratings
        .route("/api/v1/matches", post(matching::handle_matches))
        .route("/api/v1/contacts/quote", post(contact::handle_quote))
        .route("/api/v1/contacts", post(contact::handle_connect))
        .route(
            "/api/v1/connections/:id/rating",
            post(safety::handle_rate_connection),
        )
        .with_state(state)
}
