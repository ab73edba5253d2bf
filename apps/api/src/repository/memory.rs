//! In-memory repository used by handler and service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::connection::{ConnectionRow, NewConnection};
use crate::models::profile::{FinderRow, NewFinder, NewWorker, WorkerRow};
use crate::repository::{ConnectionRepository, ProfileRepository};
use crate::skills::same_label;

#[derive(Debug, Default)]
pub struct MemoryStore {
    workers: Mutex<Vec<WorkerRow>>,
    finders: Mutex<Vec<FinderRow>>,
    connections: Mutex<Vec<ConnectionRow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registration timestamps strictly increase with insertion order.
    fn stamp(n: usize) -> chrono::DateTime<Utc> {
        Utc::now() + Duration::milliseconds(n as i64)
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn insert_worker(&self, worker: NewWorker) -> Result<WorkerRow, AppError> {
        let mut workers = self.workers.lock().unwrap();
        let row = WorkerRow {
            id: Uuid::new_v4(),
            name: worker.name,
            email: worker.email,
            phone_number: worker.phone_number,
            skills: worker.skills,
            location_lat: worker.location_lat,
            location_lon: worker.location_lon,
            country: worker.country,
            address_text: worker.address_text,
            is_verified: false,
            rating: None,
            created_at: Self::stamp(workers.len()),
        };
        workers.push(row.clone());
        Ok(row)
    }

    async fn insert_finder(&self, finder: NewFinder) -> Result<FinderRow, AppError> {
        let mut finders = self.finders.lock().unwrap();
        let row = FinderRow {
            id: Uuid::new_v4(),
            name: finder.name,
            email: finder.email,
            phone_number: finder.phone_number,
            skill_needed: finder.skill_needed,
            project_description: finder.project_description,
            location_lat: finder.location_lat,
            location_lon: finder.location_lon,
            country: finder.country,
            address_text: finder.address_text,
            created_at: Self::stamp(finders.len()),
        };
        finders.push(row.clone());
        Ok(row)
    }

    async fn get_worker(&self, id: Uuid) -> Result<Option<WorkerRow>, AppError> {
        Ok(self.workers.lock().unwrap().iter().find(|w| w.id == id).cloned())
    }

    async fn get_finder(&self, id: Uuid) -> Result<Option<FinderRow>, AppError> {
        Ok(self.finders.lock().unwrap().iter().find(|f| f.id == id).cloned())
    }

    async fn find_workers_by_skill_and_country(
        &self,
        skill: &str,
        country: &str,
    ) -> Result<Vec<WorkerRow>, AppError> {
        Ok(self
            .workers
            .lock()
            .unwrap()
            .iter()
            .filter(|w| {
                w.country
                    .as_deref()
                    .is_some_and(|c| same_label(c, country))
                    && w.skills.iter().any(|s| same_label(s, skill))
            })
            .cloned()
            .collect())
    }

    async fn find_finders_needing_any(
        &self,
        skills: &[String],
    ) -> Result<Vec<FinderRow>, AppError> {
        Ok(self
            .finders
            .lock()
            .unwrap()
            .iter()
            .filter(|f| {
                f.skill_needed
                    .iter()
                    .any(|n| skills.iter().any(|s| same_label(s, n)))
            })
            .cloned()
            .collect())
    }

    async fn update_worker_rating(&self, id: Uuid, rating: Option<f64>) -> Result<(), AppError> {
        if let Some(w) = self.workers.lock().unwrap().iter_mut().find(|w| w.id == id) {
            w.rating = rating;
        }
        Ok(())
    }
}

#[async_trait]
impl ConnectionRepository for MemoryStore {
    async fn insert_connection(
        &self,
        connection: NewConnection,
    ) -> Result<ConnectionRow, AppError> {
        let mut connections = self.connections.lock().unwrap();
        let row = ConnectionRow {
            id: Uuid::new_v4(),
            finder_id: connection.finder_id,
            worker_id: connection.worker_id,
            fee_paid: connection.fee_paid,
            currency: connection.currency,
            rating: None,
            created_at: Self::stamp(connections.len()),
        };
        connections.push(row.clone());
        Ok(row)
    }

    async fn get_connection(&self, id: Uuid) -> Result<Option<ConnectionRow>, AppError> {
        Ok(self
            .connections
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn set_rating(&self, id: Uuid, rating: i16) -> Result<(), AppError> {
        if let Some(c) = self.connections.lock().unwrap().iter_mut().find(|c| c.id == id) {
            c.rating = Some(rating);
        }
        Ok(())
    }

    async fn ratings_for_worker(&self, worker_id: Uuid) -> Result<Vec<i16>, AppError> {
        Ok(self
            .connections
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.worker_id == worker_id)
            .filter_map(|c| c.rating)
            .collect())
    }
}
