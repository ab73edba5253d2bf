// Skill understanding: free-text query -> canonical ontology label.
// The resolver and the dialog are pure over immutable tables; the only
// shared mutable state is the learned-gap counter.

pub mod dialog;
pub mod gaps;
pub mod handlers;
pub mod resolver;

use std::fmt;

use serde::{Deserialize, Serialize};

/// A skill label drawn from the ontology.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalSkill(String);

impl CanonicalSkill {
    pub(crate) fn new(label: impl Into<String>) -> Self {
        CanonicalSkill(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn eq_ignore_case(&self, other: &str) -> bool {
        same_label(&self.0, other)
    }
}

/// Skill label equality used everywhere labels are compared: trimmed and
/// Unicode-lowercased, the same folding the resolver and knowledge loader
/// apply to their keys (and `lower()` applies in Postgres).
pub fn same_label(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl fmt::Display for CanonicalSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
