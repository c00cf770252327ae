//! # Retrieval Pipeline
//!
//! The single entry point the answer and HTTP layers call. One question runs
//! through the resolver, the relevance gate, the keyword extractor and the
//! hybrid retriever, and ends in exactly one [`RetrievalStatus`].
//!
//! All catalogs are read-only and the store handle is shared, so one pipeline
//! can serve any number of concurrent requests.

use crate::{
    country::{CountryMatch, CountryResolver},
    errors::{RetrievalConfigError, RetrievalError},
    providers::store::DocumentStore,
    relevance::{RelevanceGate, Screening},
    retrieval::HybridRetriever,
    terms::TermExtractor,
    tokenizer::Tokenizer,
    types::{RetrievalConfig, RetrievalResult, RetrievalStatus},
};
use std::{sync::Arc, time::Duration};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct RetrievalPipeline {
    resolver: CountryResolver,
    gate: RelevanceGate,
    extractor: TermExtractor,
    retriever: HybridRetriever,
}

impl RetrievalPipeline {
    /// Builds a pipeline over the built-in country and concept catalogs.
    ///
    /// Fails if `config` is rejected by [`RetrievalConfig::validate`].
    pub fn new(
        store: Arc<dyn DocumentStore>,
        tokenizer: Arc<dyn Tokenizer>,
        config: RetrievalConfig,
    ) -> Result<Self, RetrievalConfigError> {
        config.validate()?;
        Ok(Self {
            resolver: CountryResolver::default(),
            gate: RelevanceGate::default(),
            extractor: TermExtractor::new(tokenizer),
            retriever: HybridRetriever::new(store, config),
        })
    }

    /// Bounds every document-store call. Expiry surfaces as
    /// [`RetrievalError::Timeout`].
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.retriever = self.retriever.with_store_timeout(timeout);
        self
    }

    pub fn config(&self) -> &RetrievalConfig {
        self.retriever.config()
    }

    /// Decides what the knowledge base can say about `question`.
    ///
    /// Relevance outcomes come back as data; `Err` means the store failed or
    /// timed out.
    pub async fn retrieve(&self, question: &str) -> Result<RetrievalResult, RetrievalError> {
        let country = match self.resolver.resolve(question) {
            CountryMatch::Unsupported(name) => {
                return Ok(RetrievalResult::not_found(RetrievalStatus::NoCountry, name));
            }
            CountryMatch::Resolved(name) => Some(name),
            CountryMatch::None => None,
        };

        let concepts = match self.gate.screen(question, country.is_some()) {
            Screening::Fictional => {
                return Ok(RetrievalResult::not_found(RetrievalStatus::Fictional, ""));
            }
            Screening::OffTopic => {
                return Ok(RetrievalResult::not_found(
                    RetrievalStatus::Irrelevant,
                    country.unwrap_or_default(),
                ));
            }
            Screening::Pass(concepts) => concepts,
        };

        let result = match country {
            Some(country) => {
                info!("Target country: {}", country);
                let keywords = self.extractor.extract(question, Some(country));
                debug!(?keywords, concepts = concepts.len(), "Scoped retrieval");
                self.retriever
                    .retrieve_scoped(question, country, &keywords, &concepts)
                    .await?
            }
            None => {
                let keywords = self.extractor.extract_unscoped(question);
                debug!(?keywords, "Unscoped retrieval");
                self.retriever.retrieve_unscoped(question, &keywords).await?
            }
        };

        info!(
            status = %result.status(),
            country = result.country(),
            contexts = result.contexts().len(),
            "Retrieval finished"
        );
        Ok(result)
    }
}
