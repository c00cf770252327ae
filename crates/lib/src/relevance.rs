//! # Relevance Gate
//!
//! Two cheap checks that run before any retrieval: a probe detector for
//! questions about made-up places or test strings, and a domain-vocabulary
//! filter that requires at least one HR concept in country-scoped questions.

use crate::catalog::{Concept, DOMAIN_CONCEPTS, FICTIONAL_MARKERS};
use tracing::info;

/// Outcome of [`RelevanceGate::screen`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screening {
    Fictional,
    OffTopic,
    /// The question may proceed. Carries the concepts it mentioned, which the
    /// scorer turns into bonuses.
    Pass(Vec<&'static Concept>),
}

#[derive(Debug, Clone)]
pub struct RelevanceGate {
    fictional_markers: &'static [&'static str],
    concepts: &'static [Concept],
}

impl Default for RelevanceGate {
    fn default() -> Self {
        Self::new(FICTIONAL_MARKERS, DOMAIN_CONCEPTS)
    }
}

impl RelevanceGate {
    pub fn new(
        fictional_markers: &'static [&'static str],
        concepts: &'static [Concept],
    ) -> Self {
        Self {
            fictional_markers,
            concepts,
        }
    }

    /// Runs the fictional-probe check and, when a country was resolved, the
    /// domain-vocabulary check.
    ///
    /// Without a resolved country only the probe check applies; the result is
    /// then `Pass` with whatever concepts happen to be present.
    pub fn screen(&self, question: &str, country_resolved: bool) -> Screening {
        if let Some(marker) = self.fictional_marker(question) {
            info!("Detected fictional marker '{}'", marker);
            return Screening::Fictional;
        }

        let concepts = self.matched_concepts(question);
        if country_resolved && concepts.is_empty() {
            info!("Question '{}' carries no HR vocabulary", question);
            return Screening::OffTopic;
        }
        Screening::Pass(concepts)
    }

    pub fn fictional_marker(&self, question: &str) -> Option<&'static str> {
        self.fictional_markers
            .iter()
            .copied()
            .find(|marker| question.contains(marker))
    }

    /// Concepts triggered by the question, in catalog order.
    pub fn matched_concepts(&self, question: &str) -> Vec<&'static Concept> {
        let lowered = question.to_ascii_lowercase();
        self.concepts
            .iter()
            .filter(|concept| concept.is_triggered_by(question, &lowered))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(screening: &Screening) -> Vec<&'static str> {
        match screening {
            Screening::Pass(concepts) => concepts.iter().map(|c| c.name).collect(),
            other => panic!("expected Pass, got {other:?}"),
        }
    }

    #[test]
    fn fictional_marker_wins_over_everything() {
        let gate = RelevanceGate::default();
        assert_eq!(gate.screen("火星的年假是多少天？", false), Screening::Fictional);
        assert_eq!(gate.screen("测试一下德国加班规定", true), Screening::Fictional);
    }

    #[test]
    fn resolved_question_without_hr_terms_is_off_topic() {
        let gate = RelevanceGate::default();
        assert_eq!(gate.screen("日本今天天气怎么样", true), Screening::OffTopic);
    }

    #[test]
    fn unresolved_question_passes_without_hr_terms() {
        let gate = RelevanceGate::default();
        assert_eq!(gate.screen("今天天气怎么样", false), Screening::Pass(vec![]));
    }

    #[test]
    fn matched_concepts_follow_catalog_order() {
        let gate = RelevanceGate::default();
        let screening = gate.screen("巴西加班和年假怎么规定", true);
        assert_eq!(names(&screening), vec!["年假", "加班"]);
    }

    #[test]
    fn nested_triggers_select_every_concept_they_reveal() {
        let gate = RelevanceGate::default();
        let screening = gate.screen("英国的最低工资是多少", true);
        assert_eq!(names(&screening), vec!["工资", "最低工资"]);
    }
}
