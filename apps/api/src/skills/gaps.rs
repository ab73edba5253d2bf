//! Learned gaps — unresolved queries kept for offline ontology review.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// One unresolved term as exported to reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearnedGap {
    pub term: String,
    pub count: u64,
    pub first_seen: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct GapEntry {
    count: u64,
    first_seen: DateTime<Utc>,
}

/// Thread-safe counter of unresolved skill queries.
#[derive(Debug, Default)]
pub struct LearnedGaps {
    entries: Mutex<HashMap<String, GapEntry>>,
}

impl LearnedGaps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more occurrence of `term` and returns its running count.
    pub fn record(&self, term: &str) -> u64 {
        self.record_at(term, Utc::now())
    }

    fn record_at(&self, term: &str, now: DateTime<Utc>) -> u64 {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries.entry(term.to_string()).or_insert(GapEntry {
            count: 0,
            first_seen: now,
        });
        entry.count += 1;

        if entry.count == 1 {
            info!("New skill gap queued for review: '{term}'");
        } else {
            info!("Skill gap '{term}' seen {} times", entry.count);
        }
        entry.count
    }

    /// All gaps, most frequent first; ties ordered by term.
    pub fn snapshot(&self) -> Vec<LearnedGap> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let mut gaps: Vec<LearnedGap> = entries
            .iter()
            .map(|(term, e)| LearnedGap {
                term: term.clone(),
                count: e.count,
                first_seen: e.first_seen,
            })
            .collect();
        gaps.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
        gaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::Arc;

    #[test]
    fn test_repeat_term_increments_single_entry() {
        let gaps = LearnedGaps::new();
        assert_eq!(gaps.record("underwater welding"), 1);
        assert_eq!(gaps.record("underwater welding"), 2);

        let snapshot = gaps.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].count, 2);
    }

    #[test]
    fn test_first_seen_is_kept_on_increment() {
        let gaps = LearnedGaps::new();
        let first = Utc::now() - Duration::hours(3);
        gaps.record_at("tailor", first);
        gaps.record_at("tailor", Utc::now());

        assert_eq!(gaps.snapshot()[0].first_seen, first);
    }

    #[test]
    fn test_snapshot_orders_by_count_then_term() {
        let gaps = LearnedGaps::new();
        gaps.record("welder");
        gaps.record("barber");
        gaps.record("tailor");
        gaps.record("tailor");

        let terms: Vec<String> = gaps.snapshot().into_iter().map(|g| g.term).collect();
        assert_eq!(terms, vec!["tailor", "barber", "welder"]);
    }

    #[test]
    fn test_concurrent_records_are_not_lost() {
        let gaps = Arc::new(LearnedGaps::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gaps = Arc::clone(&gaps);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        gaps.record("locksmith");
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let snapshot = gaps.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].count, 800);
    }
}
