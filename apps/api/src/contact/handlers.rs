use anyhow::anyhow;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::contact::fees::{quote_fee, FeeQuote};
use crate::errors::AppError;
use crate::models::connection::NewConnection;
use crate::models::profile::{FinderRow, WorkerRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub finder_id: Uuid,
    pub worker_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub worker_id: Uuid,
    pub worker_name: String,
    pub fee: FeeQuote,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub connection_id: Uuid,
    pub worker_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub fee: FeeQuote,
}

/// POST /api/v1/contacts/quote
pub async fn handle_quote(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let (finder, worker) = load_pair(&state, &req).await?;
    let fee = fee_for(&state, &finder)?;
    Ok(Json(QuoteResponse {
        worker_id: worker.id,
        worker_name: worker.name,
        fee,
    }))
}

/// POST /api/v1/contacts
/// Records the connection at the quoted fee and reveals the worker's contact details.
pub async fn handle_connect(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    let (finder, worker) = load_pair(&state, &req).await?;
    let fee = fee_for(&state, &finder)?;

    let connection = state
        .connections
        .insert_connection(NewConnection {
            finder_id: finder.id,
            worker_id: worker.id,
            fee_paid: fee.amount,
            currency: fee.currency.clone(),
        })
        .await?;
    info!(
        "Contact for worker {} released under connection {} ({} {} via {})",
        worker.id, connection.id, fee.amount, fee.currency, fee.payment_method
    );

    Ok(Json(ContactResponse {
        connection_id: connection.id,
        worker_id: worker.id,
        name: worker.name,
        email: worker.email,
        phone_number: worker.phone_number,
        fee,
    }))
}

async fn load_pair(
    state: &AppState,
    req: &ContactRequest,
) -> Result<(FinderRow, WorkerRow), AppError> {
    let finder = state
        .profiles
        .get_finder(req.finder_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Finder {} not found", req.finder_id)))?;
    let worker = state
        .profiles
        .get_worker(req.worker_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Worker {} not found", req.worker_id)))?;
    Ok((finder, worker))
}

fn fee_for(state: &AppState, finder: &FinderRow) -> Result<FeeQuote, AppError> {
    quote_fee(&state.knowledge, finder.country.as_deref())
        .ok_or_else(|| AppError::Internal(anyhow!("knowledge base has no default contact fee")))
}
