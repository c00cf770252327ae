//! Test doubles shared by the library and server test suites.

use async_trait::async_trait;
use hrqa::errors::{PromptError, StoreError};
use hrqa::providers::{ai::AiProvider, store::DocumentStore};
use hrqa::tokenizer::Tokenizer;
use hrqa::types::{DocumentMetadata, DocumentType, StoredDocument};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// --- Document fixtures ---

/// Builds a stored passage with the given country, title and body.
pub fn document(country: &str, title: &str, text: &str) -> StoredDocument {
    StoredDocument::new(
        text,
        DocumentMetadata {
            country: Some(country.to_string()),
            title: title.to_string(),
            url: format!("https://guides.example/{title}"),
            doc_type: DocumentType::Normal,
        },
    )
}

/// Same as [`document`], tagged as OCR output.
pub fn ocr_document(country: &str, title: &str, text: &str) -> StoredDocument {
    let mut doc = document(country, title, text);
    doc.metadata.doc_type = DocumentType::Ocr;
    doc
}

// --- In-memory Document Store ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    GetByCountry {
        country: String,
        limit: usize,
    },
    VectorQuery {
        text: String,
        k: usize,
        country: Option<String>,
    },
}

#[derive(Debug, Default)]
struct StoreState {
    documents: Vec<StoredDocument>,
    /// When set, vector queries return these in order instead of ranking.
    vector_results: Option<Vec<StoredDocument>>,
    failure: Option<String>,
    panic: Option<String>,
    delay: Option<Duration>,
    calls: Vec<StoreCall>,
}

/// A [`DocumentStore`] over a plain vector of documents.
///
/// Vector queries rank documents by how many distinct characters of the query
/// they contain (ties keep insertion order), unless an explicit ranking was
/// programmed with [`InMemoryDocumentStore::set_vector_results`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryDocumentStore {
    pub fn new(documents: Vec<StoredDocument>) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().documents = documents;
        store
    }

    pub fn set_vector_results(&self, results: Vec<StoredDocument>) {
        self.state.lock().unwrap().vector_results = Some(results);
    }

    /// Every subsequent call fails with a 500 API error carrying `message`.
    pub fn fail_with(&self, message: &str) {
        self.state.lock().unwrap().failure = Some(message.to_string());
    }

    /// Every subsequent call panics with `message` after being recorded.
    pub fn panic_with(&self, message: &str) {
        self.state.lock().unwrap().panic = Some(message.to_string());
    }

    /// Every subsequent call sleeps for `delay` before answering.
    pub fn delay_by(&self, delay: Duration) {
        self.state.lock().unwrap().delay = Some(delay);
    }

    pub fn get_calls(&self) -> Vec<StoreCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Records the call and returns the delay and failure to apply.
    fn begin(&self, call: StoreCall) -> (Option<Duration>, Option<String>) {
        let (delay, failure, panic) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call);
            (state.delay, state.failure.clone(), state.panic.clone())
        };
        // The lock is released first so the state stays readable afterwards.
        if let Some(message) = panic {
            panic!("{message}");
        }
        (delay, failure)
    }

    async fn settle(delay: Option<Duration>, failure: Option<String>) -> Result<(), StoreError> {
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match failure {
            Some(body) => Err(StoreError::Api { status: 500, body }),
            None => Ok(()),
        }
    }
}

fn in_country(doc: &StoredDocument, country: Option<&str>) -> bool {
    country.map_or(true, |c| doc.metadata.country.as_deref() == Some(c))
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_by_country(
        &self,
        country: &str,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let (delay, failure) = self.begin(StoreCall::GetByCountry {
            country: country.to_string(),
            limit,
        });
        Self::settle(delay, failure).await?;

        let state = self.state.lock().unwrap();
        Ok(state
            .documents
            .iter()
            .filter(|d| in_country(d, Some(country)))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn vector_query(
        &self,
        text: &str,
        k: usize,
        country: Option<&str>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let (delay, failure) = self.begin(StoreCall::VectorQuery {
            text: text.to_string(),
            k,
            country: country.map(str::to_string),
        });
        Self::settle(delay, failure).await?;

        let state = self.state.lock().unwrap();
        if let Some(results) = &state.vector_results {
            return Ok(results
                .iter()
                .filter(|d| in_country(d, country))
                .take(k)
                .cloned()
                .collect());
        }

        let mut query_chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        query_chars.sort_unstable();
        query_chars.dedup();

        let mut ranked: Vec<(usize, &StoredDocument)> = state
            .documents
            .iter()
            .filter(|d| in_country(d, country))
            .map(|d| {
                let overlap = query_chars.iter().filter(|c| d.text.contains(**c)).count();
                (overlap, d)
            })
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(ranked.into_iter().take(k).map(|(_, d)| d.clone()).collect())
    }
}

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    name: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    default_response: Option<String>,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: None,
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider that answers every prompt with `response`.
    pub fn answering(response: &str) -> Self {
        Self {
            default_response: Some(response.to_string()),
            ..Self::new()
        }
    }

    /// A provider whose every call fails with an API error.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the user prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded `(system, user)` prompt pairs for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        if let Some(message) = &self.failure {
            return Err(PromptError::AiApi(message.clone()));
        }

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if user_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        self.default_response.clone().ok_or_else(|| {
            PromptError::AiApi(format!(
                "MockAiProvider: No response programmed for user prompt. Got: '{user_prompt}'"
            ))
        })
    }
}

// --- Fixed Tokenizer ---

/// A [`Tokenizer`] with hand-written segmentations, so tests do not depend on
/// jieba's dictionary. Unknown text is split on whitespace.
#[derive(Debug, Clone, Default)]
pub struct FixedTokenizer {
    segmentations: HashMap<String, Vec<String>>,
}

impl FixedTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: &str, tokens: &[&str]) -> Self {
        self.segmentations.insert(
            text.to_string(),
            tokens.iter().map(|t| t.to_string()).collect(),
        );
        self
    }
}

impl Tokenizer for FixedTokenizer {
    fn segment(&self, text: &str) -> Vec<String> {
        match self.segmentations.get(text) {
            Some(tokens) => tokens.clone(),
            None => text.split_whitespace().map(str::to_string).collect(),
        }
    }
}
