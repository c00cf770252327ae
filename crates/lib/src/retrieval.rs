//! # Hybrid Retrieval
//!
//! Scores stored passages against a question's keywords and concepts.
//!
//! - **Country-scoped**: every passage of the country is keyword-scored, gated
//!   by `scoped_min_score`, and topped up from vector search if too few survive.
//! - **Unscoped**: a wider vector query over the whole corpus is re-ranked by
//!   blending vector rank with keyword overlap, gated by `unscoped_min_score`.

use crate::{
    catalog::Concept,
    errors::RetrievalError,
    providers::store::DocumentStore,
    types::{
        CandidateOrigin, ContextPassage, RetrievalConfig, RetrievalResult, RetrievalStatus,
        ScoredCandidate, StoredDocument,
    },
};
use std::{future::Future, sync::Arc, time::Duration};
use tracing::{debug, info};

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HybridRetriever {
    store: Arc<dyn DocumentStore>,
    config: RetrievalConfig,
    store_timeout: Duration,
}

impl HybridRetriever {
    pub fn new(store: Arc<dyn DocumentStore>, config: RetrievalConfig) -> Self {
        Self {
            store,
            config,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Dispatches to the scoped path when a country is given, otherwise to the
    /// unscoped path. `concepts` only matter for scoped retrieval.
    pub async fn retrieve(
        &self,
        question: &str,
        country: Option<&str>,
        keywords: &[String],
        concepts: &[&Concept],
    ) -> Result<RetrievalResult, RetrievalError> {
        match country {
            Some(country) => {
                self.retrieve_scoped(question, country, keywords, concepts)
                    .await
            }
            None => self.retrieve_unscoped(question, keywords).await,
        }
    }

    pub async fn retrieve_scoped(
        &self,
        question: &str,
        country: &str,
        keywords: &[String],
        concepts: &[&Concept],
    ) -> Result<RetrievalResult, RetrievalError> {
        let top_k = self.config.top_k;
        let documents = self
            .with_timeout(
                "fetching documents by country",
                self.store
                    .get_by_country(country, self.config.country_fetch_limit),
            )
            .await?;

        if documents.is_empty() {
            info!("Knowledge base holds no documents for {}", country);
            return Ok(RetrievalResult::not_found(
                RetrievalStatus::NoContent,
                country,
            ));
        }

        let fetched = documents.len();
        let mut candidates: Vec<ScoredCandidate> = documents
            .into_iter()
            .filter_map(|document| {
                let score = self.score_scoped(&document, keywords, concepts);
                (score > 0).then_some(ScoredCandidate {
                    document,
                    score,
                    origin: CandidateOrigin::Keyword,
                })
            })
            .collect();
        // `sort_by` is stable, so ties keep fetch order.
        candidates.sort_by(|a, b| b.score.cmp(&a.score));

        debug!(
            country,
            fetched,
            scored = candidates.len(),
            top = candidates.first().map(|c| c.score),
            "Scored country documents"
        );

        match candidates.first() {
            Some(best) if best.score >= self.config.scoped_min_score => {}
            _ => {
                info!(
                    "Documents for {} fall below relevance threshold {}",
                    country, self.config.scoped_min_score
                );
                return Ok(RetrievalResult::not_found(
                    RetrievalStatus::Irrelevant,
                    country,
                ));
            }
        }

        // Backfilled hits are appended unscored and never re-ranked against the
        // keyword matches.
        if candidates.len() < top_k {
            let missing = top_k - candidates.len();
            let backfill = self
                .with_timeout(
                    "vector backfill query",
                    self.store.vector_query(question, missing, Some(country)),
                )
                .await?;
            debug!(
                country,
                requested = missing,
                received = backfill.len(),
                "Backfilled from vector search"
            );
            candidates.extend(backfill.into_iter().map(|document| ScoredCandidate {
                document,
                score: 0,
                origin: CandidateOrigin::Vector,
            }));
        }

        candidates.truncate(top_k);
        let contexts = to_contexts(candidates);
        Ok(RetrievalResult::found(country, contexts))
    }

    pub async fn retrieve_unscoped(
        &self,
        question: &str,
        keywords: &[String],
    ) -> Result<RetrievalResult, RetrievalError> {
        let k = self
            .config
            .unscoped_candidate_cap
            .min(self.config.top_k * self.config.unscoped_candidate_multiplier);
        let documents = self
            .with_timeout(
                "unscoped vector query",
                self.store.vector_query(question, k, None),
            )
            .await?;

        let total = documents.len();
        let mut candidates: Vec<ScoredCandidate> = documents
            .into_iter()
            .enumerate()
            .map(|(rank, document)| {
                let hits = keyword_hits(&document.text, keywords);
                let rank_bonus = (total - rank) as u32;
                ScoredCandidate {
                    score: hits * self.config.unscoped_keyword_weight + rank_bonus,
                    document,
                    origin: CandidateOrigin::Vector,
                }
            })
            .collect();
        candidates.sort_by(|a, b| b.score.cmp(&a.score));

        let threshold = self.config.unscoped_min_score;
        debug!(
            requested = k,
            received = total,
            top = candidates.first().map(|c| c.score),
            "Scored unscoped candidates"
        );

        match candidates.first() {
            Some(best) if best.score >= threshold => {}
            _ => {
                info!("No unscoped candidate reaches threshold {}", threshold);
                return Ok(RetrievalResult::not_found(RetrievalStatus::NoResults, ""));
            }
        }

        candidates.retain(|c| c.score >= threshold);
        candidates.truncate(self.config.top_k);
        let contexts = to_contexts(candidates);
        let country = contexts
            .first()
            .map(|c| c.country.clone())
            .unwrap_or_default();
        Ok(RetrievalResult::found(country, contexts))
    }

    /// `weight × keyword hits + concept bonuses + OCR bonus`.
    ///
    /// Each concept adds its weight at most once. OCR passages get a single
    /// flat bonus when any concept appears in them, however many do.
    pub fn score_scoped(
        &self,
        document: &StoredDocument,
        keywords: &[String],
        concepts: &[&Concept],
    ) -> u32 {
        let text = document.text.as_str();
        let keyword_score = keyword_hits(text, keywords) * self.config.scoped_keyword_weight;

        let mut any_concept = false;
        let mut bonus = 0;
        for concept in concepts.iter().filter(|c| c.appears_in(text)) {
            any_concept = true;
            bonus += concept.weight;
        }
        if any_concept && document.is_ocr() {
            bonus += self.config.ocr_bonus;
        }

        keyword_score + bonus
    }

    async fn with_timeout<T, E, F>(
        &self,
        operation: &'static str,
        fut: F,
    ) -> Result<T, RetrievalError>
    where
        F: Future<Output = Result<T, E>>,
        RetrievalError: From<E>,
    {
        match tokio::time::timeout(self.store_timeout, fut).await {
            Ok(result) => result.map_err(RetrievalError::from),
            Err(_) => Err(RetrievalError::Timeout {
                operation,
                after: self.store_timeout,
            }),
        }
    }
}

/// Number of keywords occurring in `text`. Repeated keywords count each time.
fn keyword_hits(text: &str, keywords: &[String]) -> u32 {
    keywords.iter().filter(|kw| text.contains(kw.as_str())).count() as u32
}

fn to_contexts(candidates: Vec<ScoredCandidate>) -> Vec<ContextPassage> {
    candidates
        .into_iter()
        .map(|candidate| ContextPassage::from(candidate.document))
        .collect()
}
