use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::proximity::Coordinate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkerRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub skills: Vec<String>,
    pub location_lat: Option<f64>,
    pub location_lon: Option<f64>,
    pub country: Option<String>,
    pub address_text: Option<String>,
    pub is_verified: bool,
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl WorkerRow {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.location_lat, self.location_lon)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FinderRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub skill_needed: Vec<String>,
    pub project_description: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lon: Option<f64>,
    pub country: Option<String>,
    pub address_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FinderRow {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.location_lat, self.location_lon)
    }
}

/// Fields supplied when registering a worker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewWorker {
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub skills: Vec<String>,
    pub location_lat: Option<f64>,
    pub location_lon: Option<f64>,
    pub country: Option<String>,
    pub address_text: Option<String>,
}

/// Fields supplied when registering a finder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFinder {
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub skill_needed: Vec<String>,
    pub project_description: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lon: Option<f64>,
    pub country: Option<String>,
    pub address_text: Option<String>,
}
