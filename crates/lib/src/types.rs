//! # Core Data Model
//!
//! Documents as the store hands them out, the per-query scoring records and the
//! tagged result the retrieval pipeline returns to its callers.

use crate::errors::RetrievalConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance of a stored passage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum DocumentType {
    /// A passage extracted from an article body.
    #[default]
    Normal,
    /// A passage recovered from an image (tables, scanned pages) by OCR.
    Ocr,
}

impl From<String> for DocumentType {
    fn from(tag: String) -> Self {
        if tag.eq_ignore_ascii_case("ocr") {
            DocumentType::Ocr
        } else {
            DocumentType::Normal
        }
    }
}

/// Metadata attached to every stored passage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub doc_type: DocumentType,
}

/// One passage owned by the document store. The pipeline only ever reads these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub text: String,
    pub metadata: DocumentMetadata,
}

impl StoredDocument {
    pub fn new(text: impl Into<String>, metadata: DocumentMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    pub fn is_ocr(&self) -> bool {
        self.metadata.doc_type == DocumentType::Ocr
    }
}

/// Which signal put a candidate into the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrigin {
    Keyword,
    Vector,
}

/// A document with the score it earned for the current question.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub document: StoredDocument,
    pub score: u32,
    pub origin: CandidateOrigin,
}

/// A passage handed to the answer layer, in the shape the API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextPassage {
    pub text: String,
    pub country: String,
    /// Title of the guide the passage was taken from.
    pub source: String,
    pub url: String,
}

impl From<StoredDocument> for ContextPassage {
    fn from(doc: StoredDocument) -> Self {
        Self {
            text: doc.text,
            country: doc
                .metadata
                .country
                .unwrap_or_else(|| "Unknown".to_string()),
            source: doc.metadata.title,
            url: doc.metadata.url,
        }
    }
}

/// Terminal state of one retrieval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStatus {
    Found,
    /// The question names a real country the corpus does not cover.
    NoCountry,
    /// The country is supported but the store holds nothing for it.
    NoContent,
    Irrelevant,
    Fictional,
    NoResults,
}

impl RetrievalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetrievalStatus::Found => "found",
            RetrievalStatus::NoCountry => "no_country",
            RetrievalStatus::NoContent => "no_content",
            RetrievalStatus::Irrelevant => "irrelevant",
            RetrievalStatus::Fictional => "fictional",
            RetrievalStatus::NoResults => "no_results",
        }
    }
}

impl fmt::Display for RetrievalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pipeline's answer to "what can the knowledge base say about this question".
///
/// `contexts` is non-empty exactly when `status` is [`RetrievalStatus::Found`];
/// the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetrievalResult {
    status: RetrievalStatus,
    country: String,
    contexts: Vec<ContextPassage>,
}

impl RetrievalResult {
    pub fn found(country: impl Into<String>, contexts: Vec<ContextPassage>) -> Self {
        debug_assert!(!contexts.is_empty(), "found results must carry contexts");
        Self {
            status: RetrievalStatus::Found,
            country: country.into(),
            contexts,
        }
    }

    pub fn not_found(status: RetrievalStatus, country: impl Into<String>) -> Self {
        debug_assert!(status != RetrievalStatus::Found);
        Self {
            status,
            country: country.into(),
            contexts: Vec::new(),
        }
    }

    pub fn status(&self) -> RetrievalStatus {
        self.status
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn contexts(&self) -> &[ContextPassage] {
        &self.contexts
    }

    pub fn into_contexts(self) -> Vec<ContextPassage> {
        self.contexts
    }

    pub fn is_found(&self) -> bool {
        self.status == RetrievalStatus::Found
    }
}

/// Tuning values for the scorer. Every field can be overridden from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of passages returned on success.
    pub top_k: usize,
    /// Inclusive lower bound on the best country-scoped score.
    pub scoped_min_score: u32,
    /// Inclusive lower bound applied to every unscoped candidate.
    pub unscoped_min_score: u32,
    /// Upper bound on documents fetched for one country.
    pub country_fetch_limit: usize,
    pub scoped_keyword_weight: u32,
    pub unscoped_keyword_weight: u32,
    /// Flat bonus for OCR passages that contain a matched concept term.
    pub ocr_bonus: u32,
    pub unscoped_candidate_cap: usize,
    pub unscoped_candidate_multiplier: usize,
}

impl RetrievalConfig {
    /// Rejects values under which a `found` result could carry no passages.
    pub fn validate(&self) -> Result<(), RetrievalConfigError> {
        if self.top_k == 0 {
            return Err(RetrievalConfigError::ZeroTopK);
        }
        Ok(())
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            scoped_min_score: 15,
            unscoped_min_score: 12,
            country_fetch_limit: 100,
            scoped_keyword_weight: 10,
            unscoped_keyword_weight: 3,
            ocr_bonus: 5,
            unscoped_candidate_cap: 15,
            unscoped_candidate_multiplier: 5,
        }
    }
}
