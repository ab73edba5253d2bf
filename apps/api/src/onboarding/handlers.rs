use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::profile::{FinderRow, WorkerRow};
use crate::onboarding::steps::{OnboardingDraft, Registration, StepInput};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StepRequest {
    pub draft: OnboardingDraft,
    pub input: StepInput,
}

#[derive(Debug, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RegisteredProfile {
    Worker(WorkerRow),
    Finder(FinderRow),
}

#[derive(Debug, Serialize)]
pub struct StepResponse {
    pub draft: OnboardingDraft,
    /// Set once the final step persisted the profile.
    pub profile: Option<RegisteredProfile>,
}

/// POST /api/v1/onboarding/step
pub async fn handle_onboarding_step(
    State(state): State<AppState>,
    Json(req): Json<StepRequest>,
) -> Result<Json<StepResponse>, AppError> {
    let draft = req.draft.advance(req.input, &state.resolver)?;
    if !draft.is_complete() {
        return Ok(Json(StepResponse {
            draft,
            profile: None,
        }));
    }

    let profile = match draft.clone().into_registration(&state.resolver)? {
        Registration::Worker(worker) => {
            RegisteredProfile::Worker(state.profiles.insert_worker(worker).await?)
        }
        Registration::Finder(finder) => {
            RegisteredProfile::Finder(state.profiles.insert_finder(finder).await?)
        }
    };

    Ok(Json(StepResponse {
        draft,
        profile: Some(profile),
    }))
}
