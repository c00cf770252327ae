pub mod chroma;

use crate::{errors::StoreError, types::StoredDocument};
use async_trait::async_trait;
use std::fmt::Debug;

pub use chroma::{ChromaStore, EmbeddingSettings};

/// Read access to the pre-populated knowledge corpus.
///
/// The retrieval pipeline only needs two queries. Everything else about the
/// store (ingestion, indexing, persistence) lives outside this crate.
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
    /// Returns up to `limit` documents whose `country` metadata equals `country`
    /// exactly. Order is whatever the store returns.
    async fn get_by_country(
        &self,
        country: &str,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Returns up to `k` documents nearest to `text`, optionally restricted to
    /// one country, best match first.
    async fn vector_query(
        &self,
        text: &str,
        k: usize,
        country: Option<&str>,
    ) -> Result<Vec<StoredDocument>, StoreError>;
}
