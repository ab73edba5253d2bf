//! Skill resolver — normalizes a free-text query to a canonical skill.
//!
//! Strict priority:
//! 1. exact synonym hit      → `Suggested` (caller confirms yes/no)
//! 2. problem phrase inside  → `Ambiguous` (caller picks a candidate)
//! 3. ontology name/keyword  → `Resolved`
//! 4. otherwise              → `Unresolved`, query recorded as a learned gap

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::knowledge::{KnowledgeBase, ProblemMapping};
use crate::skills::gaps::LearnedGaps;
use crate::skills::CanonicalSkill;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// Synonym-table hit, pending a yes/no confirmation.
    Suggested { skill: CanonicalSkill },
    /// Problem-table hit; candidates keep the table's order.
    Ambiguous {
        problem: String,
        candidates: Vec<CanonicalSkill>,
    },
    /// Direct ontology hit, no confirmation needed.
    Resolved { skill: CanonicalSkill },
    Unresolved,
}

impl Resolution {
    /// Skills the caller must choose from before the query counts as resolved.
    pub fn offered(&self) -> &[CanonicalSkill] {
        match self {
            Resolution::Suggested { skill } => std::slice::from_ref(skill),
            Resolution::Ambiguous { candidates, .. } => candidates,
            Resolution::Resolved { .. } | Resolution::Unresolved => &[],
        }
    }
}

/// One ontology skill with its lowercased name and keywords.
#[derive(Debug)]
struct OntologyEntry {
    skill: CanonicalSkill,
    terms: Vec<String>,
}

#[derive(Debug)]
pub struct SkillResolver {
    synonyms: HashMap<String, CanonicalSkill>,
    problems: Vec<ProblemMapping>,
    ontology: Vec<OntologyEntry>,
    gaps: Arc<LearnedGaps>,
}

impl SkillResolver {
    pub fn new(kb: &KnowledgeBase, gaps: Arc<LearnedGaps>) -> Self {
        let ontology = kb
            .ontology
            .iter()
            .flat_map(|category| category.skills.iter())
            .map(|skill| {
                let mut terms = Vec::with_capacity(skill.keywords.len() + 1);
                terms.push(skill.name.trim().to_lowercase());
                terms.extend(skill.keywords.iter().map(|k| k.trim().to_lowercase()));
                OntologyEntry {
                    skill: CanonicalSkill::new(skill.name.trim()),
                    terms,
                }
            })
            .collect();

        SkillResolver {
            synonyms: kb.synonyms.clone(),
            problems: kb.problems.clone(),
            ontology,
            gaps,
        }
    }

    pub fn resolve(&self, raw_query: &str) -> Resolution {
        let resolution = self.classify(raw_query);
        if resolution == Resolution::Unresolved && !raw_query.trim().is_empty() {
            self.gaps.record(raw_query.trim());
        }
        resolution
    }

    /// Same tiers as `resolve`, but never records a gap.
    pub fn classify(&self, raw_query: &str) -> Resolution {
        let query = raw_query.trim().to_lowercase();
        if query.is_empty() {
            return Resolution::Unresolved;
        }

        if let Some(skill) = self.synonyms.get(&query) {
            debug!("'{query}' matched synonym for {skill}");
            return Resolution::Suggested {
                skill: skill.clone(),
            };
        }

        if let Some(problem) = self.problems.iter().find(|p| query.contains(&p.phrase)) {
            debug!("'{query}' matched problem phrase '{}'", problem.phrase);
            return Resolution::Ambiguous {
                problem: problem.phrase.clone(),
                candidates: problem.skills.clone(),
            };
        }

        match self.ontology_lookup(&query) {
            Some(skill) => Resolution::Resolved { skill },
            None => Resolution::Unresolved,
        }
    }

    /// Synonym and ontology lookup without confirmation or gap recording.
    /// Used to file profile skills under canonical labels.
    pub fn canonicalize(&self, raw: &str) -> Option<CanonicalSkill> {
        let query = raw.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.synonyms
            .get(&query)
            .cloned()
            .or_else(|| self.ontology_lookup(&query))
    }

    /// Looks up an ontology skill by name only (case-insensitive).
    pub fn lookup_skill(&self, label: &str) -> Option<CanonicalSkill> {
        let label = label.trim();
        self.ontology
            .iter()
            .find(|entry| entry.skill.eq_ignore_case(label))
            .map(|entry| entry.skill.clone())
    }

    pub fn gaps(&self) -> &LearnedGaps {
        &self.gaps
    }

    fn ontology_lookup(&self, query: &str) -> Option<CanonicalSkill> {
        self.ontology
            .iter()
            .find(|entry| entry.terms.iter().any(|t| t == query))
            .map(|entry| entry.skill.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> SkillResolver {
        let kb = KnowledgeBase::embedded().unwrap();
        SkillResolver::new(&kb, Arc::new(LearnedGaps::new()))
    }

    fn labels(skills: &[CanonicalSkill]) -> Vec<&str> {
        skills.iter().map(CanonicalSkill::as_str).collect()
    }

    #[test]
    fn test_synonym_exact_match_is_suggested() {
        let r = resolver();
        assert_eq!(
            r.resolve("web dev"),
            Resolution::Suggested {
                skill: CanonicalSkill::new("Web Developer")
            }
        );
    }

    #[test]
    fn test_synonym_match_ignores_case_and_whitespace() {
        let r = resolver();
        assert_eq!(
            r.resolve("  PLUMER \n"),
            Resolution::Suggested {
                skill: CanonicalSkill::new("Plumber")
            }
        );
    }

    #[test]
    fn test_synonym_beats_problem_table() {
        // "injured" is both a synonym and a problem phrase
        let r = resolver();
        assert_eq!(
            r.resolve("injured"),
            Resolution::Suggested {
                skill: CanonicalSkill::new("First Aid Provider")
            }
        );
    }

    #[test]
    fn test_broken_pipe_substring_yields_plumber() {
        let r = resolver();
        match r.resolve("I have a Broken Pipe in my kitchen") {
            Resolution::Ambiguous {
                problem,
                candidates,
            } => {
                assert_eq!(problem, "broken pipe");
                assert_eq!(labels(&candidates), vec!["Plumber"]);
            }
            other => panic!("expected ambiguous result, got {other:?}"),
        }
    }

    #[test]
    fn test_problem_candidates_keep_table_order() {
        let r = resolver();
        let resolution = r.resolve("my friend got injured at work");
        assert_eq!(
            labels(resolution.offered()),
            vec!["Doctor", "Nurse", "First Aid Provider"]
        );
    }

    #[test]
    fn test_first_problem_in_table_order_wins() {
        // contains both "broken pipe" and "electrical fault"
        let r = resolver();
        let resolution = r.resolve("electrical fault after the broken pipe flooded");
        assert_eq!(labels(resolution.offered()), vec!["Plumber"]);
    }

    #[test]
    fn test_ontology_skill_name_resolves_directly() {
        let r = resolver();
        assert_eq!(
            r.resolve("doctor"),
            Resolution::Resolved {
                skill: CanonicalSkill::new("Doctor")
            }
        );
    }

    #[test]
    fn test_ontology_keyword_resolves_to_skill() {
        let r = resolver();
        assert_eq!(
            r.resolve("Landscaping"),
            Resolution::Resolved {
                skill: CanonicalSkill::new("Gardener")
            }
        );
    }

    #[test]
    fn test_keyword_must_match_exactly() {
        let r = resolver();
        assert_eq!(r.resolve("landscaping work"), Resolution::Unresolved);
    }

    #[test]
    fn test_unresolved_query_is_recorded_once_per_call() {
        let r = resolver();
        assert_eq!(r.resolve("underwater welding"), Resolution::Unresolved);
        assert_eq!(r.resolve("underwater welding"), Resolution::Unresolved);

        let gaps = r.gaps().snapshot();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].term, "underwater welding");
        assert_eq!(gaps[0].count, 2);
    }

    #[test]
    fn test_blank_query_does_not_touch_gaps() {
        let r = resolver();
        assert_eq!(r.resolve("   "), Resolution::Unresolved);
        assert_eq!(r.resolve(""), Resolution::Unresolved);
        assert!(r.gaps().snapshot().is_empty());
    }

    #[test]
    fn test_classify_never_records_gaps() {
        let r = resolver();
        assert_eq!(r.classify("underwater welding"), Resolution::Unresolved);
        assert_eq!(r.classify("broken pipe").offered().len(), 1);
        assert!(r.gaps().snapshot().is_empty());
    }

    #[test]
    fn test_resolved_outcomes_offer_nothing() {
        let r = resolver();
        assert!(r.resolve("doctor").offered().is_empty());
        assert!(r.resolve("zzz").offered().is_empty());
    }

    #[test]
    fn test_canonicalize_skips_problem_table_and_gaps() {
        let r = resolver();
        assert_eq!(r.canonicalize("plumbing emergency"), None);
        assert_eq!(r.canonicalize("broken pipe"), None);
        assert_eq!(
            r.canonicalize("grafic designer"),
            Some(CanonicalSkill::new("Graphic Designer"))
        );
        assert_eq!(r.canonicalize("sql"), Some(CanonicalSkill::new("Data Analyst")));
        assert!(r.gaps().snapshot().is_empty());
    }

    #[test]
    fn test_lookup_skill_matches_names_only() {
        let r = resolver();
        assert_eq!(
            r.lookup_skill(" web developer "),
            Some(CanonicalSkill::new("Web Developer"))
        );
        assert_eq!(r.lookup_skill("web dev"), None);
        assert_eq!(r.lookup_skill("React"), None);
    }
}
