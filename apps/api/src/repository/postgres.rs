use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::connection::{ConnectionRow, NewConnection};
use crate::models::profile::{FinderRow, NewFinder, NewWorker, WorkerRow};
use crate::repository::{ConnectionRepository, ProfileRepository};

/// Postgres-backed store for profiles and connections.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgStore {
    async fn insert_worker(&self, worker: NewWorker) -> Result<WorkerRow, AppError> {
        let row = sqlx::query_as::<_, WorkerRow>(
            r#"
            INSERT INTO skill_workers
                (name, email, phone_number, skills, location_lat, location_lon,
                 country, address_text, is_verified, rating)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE, NULL)
            RETURNING *
            "#,
        )
        .bind(&worker.name)
        .bind(&worker.email)
        .bind(&worker.phone_number)
        .bind(&worker.skills)
        .bind(worker.location_lat)
        .bind(worker.location_lon)
        .bind(&worker.country)
        .bind(&worker.address_text)
        .fetch_one(&self.pool)
        .await?;

        info!("Skill worker {} registered", row.id);
        Ok(row)
    }

    async fn insert_finder(&self, finder: NewFinder) -> Result<FinderRow, AppError> {
        let row = sqlx::query_as::<_, FinderRow>(
            r#"
            INSERT INTO skill_finders
                (name, email, phone_number, skill_needed, project_description,
                 location_lat, location_lon, country, address_text)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&finder.name)
        .bind(&finder.email)
        .bind(&finder.phone_number)
        .bind(&finder.skill_needed)
        .bind(&finder.project_description)
        .bind(finder.location_lat)
        .bind(finder.location_lon)
        .bind(&finder.country)
        .bind(&finder.address_text)
        .fetch_one(&self.pool)
        .await?;

        info!("Skill finder {} registered", row.id);
        Ok(row)
    }

    async fn get_worker(&self, id: Uuid) -> Result<Option<WorkerRow>, AppError> {
        Ok(
            sqlx::query_as::<_, WorkerRow>("SELECT * FROM skill_workers WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_finder(&self, id: Uuid) -> Result<Option<FinderRow>, AppError> {
        Ok(
            sqlx::query_as::<_, FinderRow>("SELECT * FROM skill_finders WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_workers_by_skill_and_country(
        &self,
        skill: &str,
        country: &str,
    ) -> Result<Vec<WorkerRow>, AppError> {
        Ok(sqlx::query_as::<_, WorkerRow>(
            r#"
            SELECT *
            FROM skill_workers
            WHERE lower(country) = lower($1)
              AND EXISTS (SELECT 1 FROM unnest(skills) AS s WHERE lower(s) = lower($2))
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(country)
        .bind(skill)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_finders_needing_any(
        &self,
        skills: &[String],
    ) -> Result<Vec<FinderRow>, AppError> {
        let lowered: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();
        Ok(sqlx::query_as::<_, FinderRow>(
            r#"
            SELECT *
            FROM skill_finders
            WHERE EXISTS (SELECT 1 FROM unnest(skill_needed) AS n WHERE lower(n) = ANY($1))
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(&lowered)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn update_worker_rating(&self, id: Uuid, rating: Option<f64>) -> Result<(), AppError> {
        sqlx::query("UPDATE skill_workers SET rating = $1 WHERE id = $2")
            .bind(rating)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ConnectionRepository for PgStore {
    async fn insert_connection(
        &self,
        connection: NewConnection,
    ) -> Result<ConnectionRow, AppError> {
        let row = sqlx::query_as::<_, ConnectionRow>(
            r#"
            INSERT INTO connections (finder_id, worker_id, fee_paid, currency)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(connection.finder_id)
        .bind(connection.worker_id)
        .bind(connection.fee_paid)
        .bind(&connection.currency)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Connection {} recorded: finder {} -> worker {}",
            row.id, row.finder_id, row.worker_id
        );
        Ok(row)
    }

    async fn get_connection(&self, id: Uuid) -> Result<Option<ConnectionRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ConnectionRow>("SELECT * FROM connections WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn set_rating(&self, id: Uuid, rating: i16) -> Result<(), AppError> {
        sqlx::query("UPDATE connections SET rating = $1 WHERE id = $2")
            .bind(rating)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ratings_for_worker(&self, worker_id: Uuid) -> Result<Vec<i16>, AppError> {
        Ok(sqlx::query_scalar::<_, i16>(
            "SELECT rating FROM connections WHERE worker_id = $1 AND rating IS NOT NULL",
        )
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
