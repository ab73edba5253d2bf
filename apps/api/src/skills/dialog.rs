//! Disambiguation dialog around the resolver.
//!
//! The state travels with the client; each turn is a pure transition
//! `(state, event) -> state`. Terminal states are `Resolved` and `Cancelled`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;
use crate::skills::resolver::{Resolution, SkillResolver};
use crate::skills::CanonicalSkill;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationSource {
    Synonym,
    Problem,
}

impl ConfirmationSource {
    fn of(resolution: &Resolution) -> Option<Self> {
        match resolution {
            Resolution::Suggested { .. } => Some(ConfirmationSource::Synonym),
            Resolution::Ambiguous { .. } => Some(ConfirmationSource::Problem),
            Resolution::Resolved { .. } | Resolution::Unresolved => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DialogState {
    #[default]
    AwaitingQuery,
    AwaitingConfirmation {
        query: String,
        candidates: Vec<CanonicalSkill>,
        source: ConfirmationSource,
    },
    Resolved {
        skill: CanonicalSkill,
    },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DialogEvent {
    Submit { query: String },
    Accept { skill: String },
    Reject,
    Cancel,
}

/// What happened on this turn, for the client's messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    Resolved,
    NeedsConfirmation,
    Unresolved,
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogTurn {
    pub state: DialogState,
    pub outcome: TurnOutcome,
}

#[derive(Debug, Error, PartialEq)]
pub enum DialogError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("'{0}' was not one of the offered skills")]
    NotOffered(String),

    #[error("event '{event}' is not valid while {state}")]
    UnexpectedEvent {
        state: &'static str,
        event: &'static str,
    },

    #[error("dialog already finished")]
    Finished,

    #[error("confirmation does not match what '{0}' resolves to; submit the query again")]
    StaleConfirmation(String),
}

impl From<DialogError> for AppError {
    fn from(e: DialogError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl DialogState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DialogState::Resolved { .. } | DialogState::Cancelled)
    }

    fn name(&self) -> &'static str {
        match self {
            DialogState::AwaitingQuery => "awaiting_query",
            DialogState::AwaitingConfirmation { .. } => "awaiting_confirmation",
            DialogState::Resolved { .. } => "resolved",
            DialogState::Cancelled => "cancelled",
        }
    }

    pub fn apply(
        self,
        event: DialogEvent,
        resolver: &SkillResolver,
    ) -> Result<DialogTurn, DialogError> {
        if self.is_terminal() {
            return Err(DialogError::Finished);
        }

        match (self, event) {
            (_, DialogEvent::Cancel) => Ok(DialogTurn {
                state: DialogState::Cancelled,
                outcome: TurnOutcome::Cancelled,
            }),

            (DialogState::AwaitingQuery, DialogEvent::Submit { query }) => {
                let query = query.trim().to_string();
                if query.is_empty() {
                    return Err(DialogError::EmptyQuery);
                }
                Ok(match resolver.resolve(&query) {
                    Resolution::Resolved { skill } => DialogTurn {
                        state: DialogState::Resolved { skill },
                        outcome: TurnOutcome::Resolved,
                    },
                    Resolution::Unresolved => DialogTurn {
                        state: DialogState::AwaitingQuery,
                        outcome: TurnOutcome::Unresolved,
                    },
                    pending => DialogTurn {
                        state: DialogState::AwaitingConfirmation {
                            candidates: pending.offered().to_vec(),
                            source: ConfirmationSource::of(&pending)
                                .unwrap_or(ConfirmationSource::Problem),
                            query,
                        },
                        outcome: TurnOutcome::NeedsConfirmation,
                    },
                })
            }

            (
                DialogState::AwaitingConfirmation {
                    query,
                    candidates,
                    source,
                },
                DialogEvent::Accept { skill },
            ) => {
                // The state comes back from the client: re-derive what was offered.
                let expected = resolver.classify(&query);
                if expected.offered() != candidates.as_slice()
                    || ConfirmationSource::of(&expected) != Some(source)
                {
                    return Err(DialogError::StaleConfirmation(query));
                }
                let chosen = candidates
                    .iter()
                    .find(|c| c.eq_ignore_case(&skill))
                    .and_then(|c| resolver.lookup_skill(c.as_str()))
                    .ok_or(DialogError::NotOffered(skill))?;
                Ok(DialogTurn {
                    state: DialogState::Resolved { skill: chosen },
                    outcome: TurnOutcome::Resolved,
                })
            }

            (DialogState::AwaitingConfirmation { .. }, DialogEvent::Reject) => Ok(DialogTurn {
                state: DialogState::AwaitingQuery,
                outcome: TurnOutcome::Rejected,
            }),

            (state, event) => Err(DialogError::UnexpectedEvent {
                state: state.name(),
                event: match event {
                    DialogEvent::Submit { .. } => "submit",
                    DialogEvent::Accept { .. } => "accept",
                    DialogEvent::Reject => "reject",
                    DialogEvent::Cancel => "cancel",
                },
            }),
        }
    }
}
