use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{FinderRow, WorkerRow};
use crate::repository::ProfileRepository;

/// A finder's request as shown to workers. Contact details stay behind the fee gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPost {
    pub finder_id: Uuid,
    pub finder_name: String,
    pub skill_needed: Vec<String>,
    pub project_description: Option<String>,
    pub country: Option<String>,
    pub address_text: Option<String>,
}

impl From<FinderRow> for JobPost {
    fn from(f: FinderRow) -> Self {
        JobPost {
            finder_id: f.id,
            finder_name: f.name,
            skill_needed: f.skill_needed,
            project_description: f.project_description,
            country: f.country,
            address_text: f.address_text,
        }
    }
}

/// Finders whose needs overlap the worker's skills.
pub async fn recommend_jobs(
    profiles: &dyn ProfileRepository,
    worker: &WorkerRow,
) -> Result<Vec<JobPost>, AppError> {
    if worker.skills.iter().all(|s| s.trim().is_empty()) {
        return Err(AppError::UnprocessableEntity(
            "You have not listed any skills. Update your profile to receive job recommendations."
                .to_string(),
        ));
    }
    let finders = profiles.find_finders_needing_any(&worker.skills).await?;
    Ok(finders.into_iter().map(JobPost::from).collect())
}
