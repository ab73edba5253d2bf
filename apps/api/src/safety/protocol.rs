//! Safety protocol: low ratings and dispute language raise an alert
//! carrying the local police number.

use serde::Serialize;
use tracing::warn;

use crate::knowledge::SafetyConfig;
use crate::skills::same_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertReason {
    LowRating,
    DisputeKeyword,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyAlert {
    pub reasons: Vec<AlertReason>,
    /// Dispute keywords found in the comment, in configuration order.
    pub keywords: Vec<String>,
    /// Country whose emergency numbers were used.
    pub country: String,
    pub police: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SafetyProtocol<'a> {
    config: &'a SafetyConfig,
}

impl<'a> SafetyProtocol<'a> {
    pub fn new(config: &'a SafetyConfig) -> Self {
        SafetyProtocol { config }
    }

    /// Returns an alert when `rating` is at or below the threshold or the
    /// comment mentions a dispute keyword.
    pub fn assess(
        &self,
        rating: i16,
        comment: Option<&str>,
        worker_country: Option<&str>,
    ) -> Option<SafetyAlert> {
        let mut reasons = Vec::new();
        if rating <= i16::from(self.config.low_rating_threshold) {
            reasons.push(AlertReason::LowRating);
        }

        let comment = comment.map(str::to_lowercase).unwrap_or_default();
        let keywords: Vec<String> = self
            .config
            .dispute_keywords
            .iter()
            .filter(|k| !comment.is_empty() && comment.contains(&k.to_lowercase()))
            .cloned()
            .collect();
        if !keywords.is_empty() {
            reasons.push(AlertReason::DisputeKeyword);
        }

        if reasons.is_empty() {
            return None;
        }

        let (country, police) = self.police_number(worker_country);
        warn!(
            "Safety protocol triggered (rating {rating}, reasons {reasons:?}); \
             directing to police {police} ({country})"
        );

        Some(SafetyAlert {
            reasons,
            keywords,
            message: format!(
                "If you feel unsafe or have been harmed, contact the police on {police}."
            ),
            country,
            police,
        })
    }

    fn police_number(&self, worker_country: Option<&str>) -> (String, String) {
        let contacts = &self.config.emergency_contacts;
        let local = worker_country.map(str::trim).and_then(|country| {
            contacts
                .iter()
                .find(|(key, _)| same_label(key, country))
        });
        match local {
            Some((key, numbers)) => (key.clone(), numbers.police.clone()),
            None => {
                let fallback = &self.config.fallback_country;
                let police = contacts
                    .get(fallback)
                    .map(|numbers| numbers.police.clone())
                    .unwrap_or_default();
                (fallback.clone(), police)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;

    fn safety() -> SafetyConfig {
        KnowledgeBase::embedded().unwrap().safety
    }

    #[test]
    fn test_good_rating_without_dispute_is_quiet() {
        let config = safety();
        let protocol = SafetyProtocol::new(&config);
        assert_eq!(protocol.assess(4, Some("Great job, on time"), Some("USA")), None);
        assert_eq!(protocol.assess(3, None, None), None);
    }

    #[test]
    fn test_rating_at_threshold_alerts() {
        let config = safety();
        let alert = SafetyProtocol::new(&config)
            .assess(2, None, Some("USA"))
            .unwrap();
        assert_eq!(alert.reasons, vec![AlertReason::LowRating]);
        assert_eq!(alert.police, "911");
        assert_eq!(alert.country, "USA");
    }

    #[test]
    fn test_dispute_keyword_alerts_despite_good_rating() {
        let config = safety();
        let alert = SafetyProtocol::new(&config)
            .assess(5, Some("Honestly felt like a SCAM"), Some("uk"))
            .unwrap();
        assert_eq!(alert.reasons, vec![AlertReason::DisputeKeyword]);
        assert_eq!(alert.keywords, vec!["scam"]);
        assert_eq!(alert.police, "999");
    }

    #[test]
    fn test_both_reasons_reported() {
        let config = safety();
        let alert = SafetyProtocol::new(&config)
            .assess(1, Some("no show and a threat"), Some("Nigeria"))
            .unwrap();
        assert_eq!(
            alert.reasons,
            vec![AlertReason::LowRating, AlertReason::DisputeKeyword]
        );
        assert_eq!(alert.keywords, vec!["threat", "no show"]);
    }

    #[test]
    fn test_unknown_country_uses_fallback_numbers() {
        let config = safety();
        let protocol = SafetyProtocol::new(&config);

        let alert = protocol.assess(1, None, Some("Ghana")).unwrap();
        assert_eq!(alert.country, "Nigeria");
        assert_eq!(alert.police, "112");

        let alert = protocol.assess(1, None, None).unwrap();
        assert_eq!(alert.police, "112");
    }
}
