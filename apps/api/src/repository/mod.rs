//! Repository abstraction over profile and connection storage.
//!
//! Handlers only see these traits; `AppState` carries them as
//! `Arc<dyn …>` so the Postgres backend can be swapped in tests.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::connection::{ConnectionRow, NewConnection};
use crate::models::profile::{FinderRow, NewFinder, NewWorker, WorkerRow};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn insert_worker(&self, worker: NewWorker) -> Result<WorkerRow, AppError>;

    async fn insert_finder(&self, finder: NewFinder) -> Result<FinderRow, AppError>;

    async fn get_worker(&self, id: Uuid) -> Result<Option<WorkerRow>, AppError>;

    async fn get_finder(&self, id: Uuid) -> Result<Option<FinderRow>, AppError>;

    /// Workers offering `skill` in `country`, both compared case-insensitively,
    /// in registration order.
    async fn find_workers_by_skill_and_country(
        &self,
        skill: &str,
        country: &str,
    ) -> Result<Vec<WorkerRow>, AppError>;

    /// Finders whose needs overlap `skills` (case-insensitive), in registration order.
    async fn find_finders_needing_any(
        &self,
        skills: &[String],
    ) -> Result<Vec<FinderRow>, AppError>;

    async fn update_worker_rating(&self, id: Uuid, rating: Option<f64>) -> Result<(), AppError>;
}

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    async fn insert_connection(&self, connection: NewConnection) -> Result<ConnectionRow, AppError>;

    async fn get_connection(&self, id: Uuid) -> Result<Option<ConnectionRow>, AppError>;

    async fn set_rating(&self, id: Uuid, rating: i16) -> Result<(), AppError>;

    /// Every rating recorded against a worker's connections.
    async fn ratings_for_worker(&self, worker_id: Uuid) -> Result<Vec<i16>, AppError>;
}
