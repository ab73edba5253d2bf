use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::skills::dialog::{DialogEvent, DialogState, DialogTurn};
use crate::skills::gaps::LearnedGap;
use crate::skills::resolver::Resolution;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct DialogRequest {
    #[serde(default)]
    pub state: DialogState,
    pub event: DialogEvent,
}

#[derive(Debug, Serialize)]
pub struct GapReport {
    pub knowledge_version: String,
    pub gaps: Vec<LearnedGap>,
}

/// POST /api/v1/skills/resolve
pub async fn handle_resolve(
    State(state): State<AppState>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<Resolution>, AppError> {
    if req.query.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter a skill or problem to search.".to_string(),
        ));
    }
    Ok(Json(state.resolver.resolve(&req.query)))
}

/// POST /api/v1/skills/dialog
pub async fn handle_dialog(
    State(state): State<AppState>,
    Json(req): Json<DialogRequest>,
) -> Result<Json<DialogTurn>, AppError> {
    let turn = req.state.apply(req.event, &state.resolver)?;
    Ok(Json(turn))
}

/// GET /api/v1/skills/gaps
pub async fn handle_gaps(State(state): State<AppState>) -> Json<GapReport> {
    Json(GapReport {
        knowledge_version: state.knowledge.version.clone(),
        gaps: state.resolver.gaps().snapshot(),
    })
}
