use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{FinderRow, WorkerRow};
use crate::profiles::recommendations::{recommend_jobs, JobPost};
use crate::state::AppState;

/// GET /api/v1/workers/:id
pub async fn handle_get_worker(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkerRow>, AppError> {
    let worker = state
        .profiles
        .get_worker(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Worker {id} not found")))?;
    Ok(Json(worker))
}

/// GET /api/v1/finders/:id
pub async fn handle_get_finder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FinderRow>, AppError> {
    let finder = state
        .profiles
        .get_finder(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Finder {id} not found")))?;
    Ok(Json(finder))
}

/// GET /api/v1/workers/:id/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<JobPost>>, AppError> {
    let worker = state
        .profiles
        .get_worker(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Worker {id} not found")))?;
    let jobs = recommend_jobs(state.profiles.as_ref(), &worker).await?;
    Ok(Json(jobs))
}
