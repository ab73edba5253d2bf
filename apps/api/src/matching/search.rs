//! Match search — candidates for a finder, in store order or closest first.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::proximity::rank;
use crate::models::profile::{FinderRow, WorkerRow};
use crate::repository::ProfileRepository;
use crate::skills::CanonicalSkill;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    Closest,
    #[default]
    All,
}

/// Public view of a worker. Contact details stay behind the fee gate.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerCard {
    pub id: Uuid,
    pub name: String,
    pub skills: Vec<String>,
    pub address_text: Option<String>,
    pub rating: Option<f64>,
    pub is_verified: bool,
}

impl From<&WorkerRow> for WorkerCard {
    fn from(w: &WorkerRow) -> Self {
        WorkerCard {
            id: w.id,
            name: w.name.clone(),
            skills: w.skills.clone(),
            address_text: w.address_text.clone(),
            rating: w.rating,
            is_verified: w.is_verified,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkerMatch {
    #[serde(flatten)]
    pub worker: WorkerCard,
    /// Squared degree distance; only set in `closest` mode.
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    Matches {
        skill: CanonicalSkill,
        country: String,
        mode: MatchMode,
        matches: Vec<WorkerMatch>,
        /// Workers dropped from a closest-first ranking for lacking a location.
        excluded: usize,
    },
    NoMatches {
        skill: CanonicalSkill,
        country: String,
        excluded: usize,
    },
    /// Closest-first was asked for but the finder has no usable location.
    LocationRequired {
        skill: CanonicalSkill,
        country: String,
        available: usize,
    },
}

pub async fn find_matches(
    profiles: &dyn ProfileRepository,
    finder: &FinderRow,
    skill: &CanonicalSkill,
    mode: MatchMode,
    default_country: &str,
) -> Result<MatchOutcome, AppError> {
    let country = finder
        .country
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(default_country)
        .to_string();

    let workers = profiles
        .find_workers_by_skill_and_country(skill.as_str(), &country)
        .await?;
    info!(
        "Found {} '{}' workers in {} for finder {}",
        workers.len(),
        skill,
        country,
        finder.id
    );

    if workers.is_empty() {
        return Ok(MatchOutcome::NoMatches {
            skill: skill.clone(),
            country,
            excluded: 0,
        });
    }

    match mode {
        MatchMode::All => Ok(MatchOutcome::Matches {
            skill: skill.clone(),
            country,
            mode,
            matches: workers
                .iter()
                .map(|w| WorkerMatch {
                    worker: w.into(),
                    distance: None,
                })
                .collect(),
            excluded: 0,
        }),
        MatchMode::Closest => {
            let Some(origin) = finder.coordinate() else {
                return Ok(MatchOutcome::LocationRequired {
                    skill: skill.clone(),
                    country,
                    available: workers.len(),
                });
            };

            let ranking = rank(origin, workers.iter().map(|w| (w, w.coordinate())));
            if ranking.excluded > 0 {
                info!(
                    "{} workers excluded from proximity ranking for missing coordinates",
                    ranking.excluded
                );
            }

            if ranking.ranked.is_empty() {
                return Ok(MatchOutcome::NoMatches {
                    skill: skill.clone(),
                    country,
                    excluded: ranking.excluded,
                });
            }

            Ok(MatchOutcome::Matches {
                skill: skill.clone(),
                country,
                mode,
                matches: ranking
                    .ranked
                    .into_iter()
                    .map(|r| WorkerMatch {
                        worker: r.id.into(),
                        distance: Some(r.distance),
                    })
                    .collect(),
                excluded: ranking.excluded,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{NewFinder, NewWorker};
    use crate::repository::memory::MemoryStore;

    fn worker(name: &str, skills: &[&str], country: &str, at: Option<(f64, f64)>) -> NewWorker {
        NewWorker {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone_number: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            location_lat: at.map(|(lat, _)| lat),
            location_lon: at.map(|(_, lon)| lon),
            country: Some(country.to_string()),
            address_text: None,
        }
    }

    fn finder(country: Option<&str>, at: Option<(f64, f64)>) -> NewFinder {
        NewFinder {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: None,
            skill_needed: vec!["Plumber".to_string()],
            project_description: Some("Fix leaky faucet".to_string()),
            location_lat: at.map(|(lat, _)| lat),
            location_lon: at.map(|(_, lon)| lon),
            country: country.map(str::to_string),
            address_text: None,
        }
    }

    fn names(outcome: &MatchOutcome) -> Vec<String> {
        match outcome {
            MatchOutcome::Matches { matches, .. } => {
                matches.iter().map(|m| m.worker.name.clone()).collect()
            }
            other => panic!("expected matches, got {other:?}"),
        }
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_worker(worker("Far", &["Plumber"], "Nigeria", Some((6.54, 3.34))))
            .await
            .unwrap();
        store
            .insert_worker(worker("Unplaced", &["plumber"], "Nigeria", None))
            .await
            .unwrap();
        store
            .insert_worker(worker("Near", &["Plumber", "Mason"], "Nigeria", Some((6.55, 3.35))))
            .await
            .unwrap();
        store
            .insert_worker(worker("Abroad", &["Plumber"], "USA", Some((6.56, 3.36))))
            .await
            .unwrap();
        store
            .insert_worker(worker("Painter", &["Painter"], "Nigeria", Some((6.56, 3.36))))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_all_mode_keeps_store_order_and_filters() {
        let store = seeded().await;
        let f = store
            .insert_finder(finder(Some("Nigeria"), Some((6.56, 3.36))))
            .await
            .unwrap();

        let outcome = find_matches(
            &store,
            &f,
            &CanonicalSkill::new("Plumber"),
            MatchMode::All,
            "Nigeria",
        )
        .await
        .unwrap();
        assert_eq!(names(&outcome), vec!["Far", "Unplaced", "Near"]);
    }

    #[tokio::test]
    async fn test_closest_mode_ranks_and_counts_excluded() {
        let store = seeded().await;
        let f = store
            .insert_finder(finder(Some("nigeria"), Some((6.56, 3.36))))
            .await
            .unwrap();

        let outcome = find_matches(
            &store,
            &f,
            &CanonicalSkill::new("Plumber"),
            MatchMode::Closest,
            "Nigeria",
        )
        .await
        .unwrap();
        assert_eq!(names(&outcome), vec!["Near", "Far"]);
        match outcome {
            MatchOutcome::Matches {
                excluded, matches, ..
            } => {
                assert_eq!(excluded, 1);
                assert!(matches.iter().all(|m| m.distance.is_some()));
            }
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_closest_without_finder_location_requires_location() {
        let store = seeded().await;
        let f = store.insert_finder(finder(Some("Nigeria"), None)).await.unwrap();

        let outcome = find_matches(
            &store,
            &f,
            &CanonicalSkill::new("Plumber"),
            MatchMode::Closest,
            "Nigeria",
        )
        .await
        .unwrap();
        assert!(matches!(outcome, MatchOutcome::LocationRequired { available: 3, .. }));
    }

    #[tokio::test]
    async fn test_missing_finder_country_uses_default() {
        let store = seeded().await;
        let f = store.insert_finder(finder(None, None)).await.unwrap();

        let outcome = find_matches(
            &store,
            &f,
            &CanonicalSkill::new("Plumber"),
            MatchMode::All,
            "USA",
        )
        .await
        .unwrap();
        assert_eq!(names(&outcome), vec!["Abroad"]);
    }

    #[tokio::test]
    async fn test_no_workers_is_no_matches() {
        let store = seeded().await;
        let f = store.insert_finder(finder(Some("Nigeria"), None)).await.unwrap();

        let outcome = find_matches(
            &store,
            &f,
            &CanonicalSkill::new("Doctor"),
            MatchMode::All,
            "Nigeria",
        )
        .await
        .unwrap();
        assert!(matches!(outcome, MatchOutcome::NoMatches { excluded: 0, .. }));
    }

    #[tokio::test]
    async fn test_closest_with_all_workers_unplaced_is_no_matches() {
        let store = MemoryStore::new();
        store
            .insert_worker(worker("Ghost", &["Mason"], "Nigeria", None))
            .await
            .unwrap();
        let f = store
            .insert_finder(finder(Some("Nigeria"), Some((6.5, 3.3))))
            .await
            .unwrap();

        let outcome = find_matches(
            &store,
            &f,
            &CanonicalSkill::new("Mason"),
            MatchMode::Closest,
            "Nigeria",
        )
        .await
        .unwrap();
        assert!(matches!(outcome, MatchOutcome::NoMatches { excluded: 1, .. }));
    }
}
