use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::search::{find_matches, MatchMode, MatchOutcome};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub finder_id: Uuid,
    /// Ontology skill name, as produced by the skill dialog.
    pub skill: String,
    #[serde(default)]
    pub mode: MatchMode,
}

/// POST /api/v1/matches
pub async fn handle_matches(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchOutcome>, AppError> {
    let skill = state.resolver.lookup_skill(&req.skill).ok_or_else(|| {
        AppError::Validation(format!(
            "'{}' is not a known skill. Resolve the query first.",
            req.skill
        ))
    })?;

    let finder = state
        .profiles
        .get_finder(req.finder_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Finder {} not found", req.finder_id)))?;

    let outcome = find_matches(
        state.profiles.as_ref(),
        &finder,
        &skill,
        req.mode,
        &state.config.default_country,
    )
    .await?;
    Ok(Json(outcome))
}
