use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A finder→worker contact made through the fee gate, later rated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConnectionRow {
    pub id: Uuid,
    pub finder_id: Uuid,
    pub worker_id: Uuid,
    pub fee_paid: f64,
    pub currency: String,
    pub rating: Option<i16>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewConnection {
    pub finder_id: Uuid,
    pub worker_id: Uuid,
    pub fee_paid: f64,
    pub currency: String,
}
