use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::safety::protocol::{SafetyAlert, SafetyProtocol};
use crate::safety::ratings::{average_rating, validate_rating};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    #[serde(default)]
    pub rating: Value,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub connection_id: Uuid,
    pub worker_id: Uuid,
    pub rating: i16,
    pub worker_average: Option<f64>,
    pub safety_alert: Option<SafetyAlert>,
}

/// POST /api/v1/connections/:id/rating
pub async fn handle_rate_connection(
    State(state): State<AppState>,
    Path(connection_id): Path<Uuid>,
    Json(req): Json<RatingRequest>,
) -> Result<Json<RatingResponse>, AppError> {
    let rating = validate_rating(&req.rating)?;

    let connection = state
        .connections
        .get_connection(connection_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Connection {connection_id} not found")))?;

    state.connections.set_rating(connection.id, rating).await?;

    let ratings = state.connections.ratings_for_worker(connection.worker_id).await?;
    let worker_average = average_rating(&ratings);
    state
        .profiles
        .update_worker_rating(connection.worker_id, worker_average)
        .await?;
    info!(
        "Connection {} rated {rating}; worker {} now averages {worker_average:?}",
        connection.id, connection.worker_id
    );

    let worker_country = state
        .profiles
        .get_worker(connection.worker_id)
        .await?
        .and_then(|w| w.country);
    let safety_alert = SafetyProtocol::new(&state.knowledge.safety).assess(
        rating,
        req.comment.as_deref(),
        worker_country.as_deref(),
    );

    Ok(Json(RatingResponse {
        connection_id: connection.id,
        worker_id: connection.worker_id,
        rating,
        worker_average,
        safety_alert,
    }))
}
