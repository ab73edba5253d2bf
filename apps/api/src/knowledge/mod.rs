//! Knowledge base — versioned configuration data loaded once at startup.
//!
//! Holds the job ontology, synonym and problem tables, contact fees,
//! exchange rates and the safety protocol. Immutable after construction.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::skills::CanonicalSkill;

/// Default document compiled into the binary.
const EMBEDDED_KNOWLEDGE: &str = include_str!("../../knowledge/wisdom-v1.json");

/// Fee table key used when a country has no entry of its own.
pub const DEFAULT_FEE_KEY: &str = "Default_International";

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("failed to read knowledge file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed knowledge document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("ontology is empty")]
    EmptyOntology,

    #[error("blank {0} entry")]
    BlankEntry(&'static str),

    #[error("skill '{0}' is declared more than once in the ontology")]
    DuplicateSkill(String),

    #[error("{table} entry '{phrase}' points at '{target}', which is not an ontology skill")]
    UnknownSkill {
        table: &'static str,
        phrase: String,
        target: String,
    },

    #[error("contact fee table has no 'Default_International' entry")]
    MissingDefaultFee,

    #[error("safety fallback country '{0}' has no emergency contacts")]
    MissingFallbackContacts(String),

    #[error("exchange rates must be positive")]
    InvalidExchangeRate,
}

// ────────────────────────────────────────────────────────────────────────────
// Document shape
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntologySkill {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntologyCategory {
    pub name: String,
    pub skills: Vec<OntologySkill>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDef {
    pub phrase: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactFee {
    pub currency: String,
    pub amount: f64,
    pub payment_method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRates {
    pub usd_per_btc: f64,
    pub ngn_per_usd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContacts {
    pub police: String,
    pub fire: String,
    pub ambulance: String,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Ratings at or below this value trigger a safety review.
    pub low_rating_threshold: u8,
    pub dispute_keywords: Vec<String>,
    pub fallback_country: String,
    pub emergency_contacts: HashMap<String, EmergencyContacts>,
}

#[derive(Debug, Clone, Deserialize)]
struct KnowledgeDocument {
    version: String,
    ontology: Vec<OntologyCategory>,
    synonyms: HashMap<String, String>,
    problems: Vec<ProblemDef>,
    contact_fees: HashMap<String, ContactFee>,
    exchange_rates: ExchangeRates,
    safety: SafetyConfig,
}

// ────────────────────────────────────────────────────────────────────────────
// Validated knowledge base
// ────────────────────────────────────────────────────────────────────────────

/// A problem phrase and its ordered candidate skills.
#[derive(Debug, Clone)]
pub struct ProblemMapping {
    pub phrase: String,
    pub skills: Vec<CanonicalSkill>,
}

/// Validated, immutable knowledge base.
///
/// Synonym targets and problem candidates are rewritten to the ontology's
/// spelling, so every skill the resolver can return is an ontology key.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub version: String,
    pub ontology: Vec<OntologyCategory>,
    pub synonyms: HashMap<String, CanonicalSkill>,
    pub problems: Vec<ProblemMapping>,
    pub contact_fees: HashMap<String, ContactFee>,
    pub exchange_rates: ExchangeRates,
    pub safety: SafetyConfig,
}

impl KnowledgeBase {
    /// Loads the override file when given, otherwise the embedded document.
    pub fn load(path: Option<&Path>) -> Result<Self, KnowledgeError> {
        let kb = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::embedded()?,
        };
        info!(
            "Knowledge base {} loaded: {} categories, {} synonyms, {} problem mappings",
            kb.version,
            kb.ontology.len(),
            kb.synonyms.len(),
            kb.problems.len()
        );
        Ok(kb)
    }

    pub fn embedded() -> Result<Self, KnowledgeError> {
        Self::from_json(EMBEDDED_KNOWLEDGE)
    }

    pub fn from_path(path: &Path) -> Result<Self, KnowledgeError> {
        let raw = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, KnowledgeError> {
        let doc: KnowledgeDocument = serde_json::from_str(raw)?;
        Self::validate(doc)
    }

    fn validate(doc: KnowledgeDocument) -> Result<Self, KnowledgeError> {
        if doc.ontology.iter().all(|c| c.skills.is_empty()) {
            return Err(KnowledgeError::EmptyOntology);
        }

        // lowercase skill name -> ontology spelling
        let mut skill_index: HashMap<String, CanonicalSkill> = HashMap::new();
        for category in &doc.ontology {
            if category.name.trim().is_empty() {
                return Err(KnowledgeError::BlankEntry("ontology category"));
            }
            for skill in &category.skills {
                let key = skill.name.trim().to_lowercase();
                if key.is_empty() {
                    return Err(KnowledgeError::BlankEntry("ontology skill"));
                }
                if skill_index
                    .insert(key, CanonicalSkill::new(skill.name.trim()))
                    .is_some()
                {
                    return Err(KnowledgeError::DuplicateSkill(skill.name.clone()));
                }
            }
        }

        let lookup = |table: &'static str, phrase: &str, target: &str| {
            skill_index
                .get(&target.trim().to_lowercase())
                .cloned()
                .ok_or_else(|| KnowledgeError::UnknownSkill {
                    table,
                    phrase: phrase.to_string(),
                    target: target.to_string(),
                })
        };

        let mut synonyms = HashMap::with_capacity(doc.synonyms.len());
        for (phrase, target) in &doc.synonyms {
            let key = phrase.trim().to_lowercase();
            if key.is_empty() {
                return Err(KnowledgeError::BlankEntry("synonym"));
            }
            synonyms.insert(key, lookup("synonym", phrase, target)?);
        }

        let mut problems = Vec::with_capacity(doc.problems.len());
        for problem in &doc.problems {
            let phrase = problem.phrase.trim().to_lowercase();
            if phrase.is_empty() || problem.skills.is_empty() {
                return Err(KnowledgeError::BlankEntry("problem"));
            }
            let skills = problem
                .skills
                .iter()
                .map(|s| lookup("problem", &problem.phrase, s))
                .collect::<Result<Vec<_>, _>>()?;
            problems.push(ProblemMapping { phrase, skills });
        }

        if !doc.contact_fees.contains_key(DEFAULT_FEE_KEY) {
            return Err(KnowledgeError::MissingDefaultFee);
        }
        if doc.exchange_rates.usd_per_btc <= 0.0 || doc.exchange_rates.ngn_per_usd <= 0.0 {
            return Err(KnowledgeError::InvalidExchangeRate);
        }
        if !doc
            .safety
            .emergency_contacts
            .contains_key(&doc.safety.fallback_country)
        {
            return Err(KnowledgeError::MissingFallbackContacts(
                doc.safety.fallback_country.clone(),
            ));
        }

        Ok(KnowledgeBase {
            version: doc.version,
            ontology: doc.ontology,
            synonyms,
            problems,
            contact_fees: doc.contact_fees,
            exchange_rates: doc.exchange_rates,
            safety: doc.safety,
        })
    }
}
