//! # Chroma Document Store
//!
//! Talks to a Chroma server over its REST API. The collection id is resolved
//! once at connect time; vector queries embed the question through an
//! OpenAI-compatible embeddings endpoint first.

use super::DocumentStore;
use crate::{
    errors::StoreError,
    providers::ai::generate_embedding,
    types::{DocumentMetadata, StoredDocument},
};
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use tracing::{debug, info};

/// Where and how to embed query text.
#[derive(Clone, Debug)]
pub struct EmbeddingSettings {
    pub api_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

#[derive(Clone)]
pub struct ChromaStore {
    client: ReqwestClient,
    base_url: String,
    collection_name: String,
    collection_id: String,
    embedding: EmbeddingSettings,
}

impl fmt::Debug for ChromaStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChromaStore")
            .field("base_url", &self.base_url)
            .field("collection_name", &self.collection_name)
            .field("collection_id", &self.collection_id)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct CollectionResponse {
    id: String,
}

#[derive(Serialize)]
struct GetRequest<'a> {
    #[serde(rename = "where")]
    filter: Value,
    limit: usize,
    include: &'a [&'a str],
}

#[derive(Deserialize)]
struct GetResponse {
    #[serde(default)]
    documents: Vec<Option<String>>,
    #[serde(default)]
    metadatas: Vec<Option<DocumentMetadata>>,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query_embeddings: Vec<Vec<f32>>,
    n_results: usize,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    filter: Option<Value>,
    include: &'a [&'a str],
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    documents: Option<Vec<Vec<Option<String>>>>,
    #[serde(default)]
    metadatas: Option<Vec<Vec<Option<DocumentMetadata>>>>,
}

const INCLUDE: &[&str] = &["documents", "metadatas"];

impl ChromaStore {
    /// Connects to `base_url` and resolves the id of `collection_name`.
    pub async fn connect(
        base_url: &str,
        collection_name: &str,
        embedding: EmbeddingSettings,
    ) -> Result<Self, StoreError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(StoreError::ReqwestClientBuild)?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let url = format!("{base_url}/api/v1/collections/{collection_name}");
        let response = client.get(&url).send().await.map_err(StoreError::Request)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::CollectionNotFound(collection_name.to_string()));
        }
        let collection: CollectionResponse = read_json(response).await?;

        info!(
            collection = collection_name,
            id = %collection.id,
            "Connected to Chroma collection"
        );

        Ok(Self {
            client,
            base_url,
            collection_name: collection_name.to_string(),
            collection_id: collection.id,
            embedding,
        })
    }

    fn collection_url(&self, action: &str) -> String {
        format!(
            "{}/api/v1/collections/{}/{}",
            self.base_url, self.collection_id, action
        )
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(StoreError::Api {
            status: status.as_u16(),
            body,
        });
    }
    response.json().await.map_err(StoreError::Deserialization)
}

fn zip_documents(
    documents: Vec<Option<String>>,
    metadatas: Vec<Option<DocumentMetadata>>,
) -> Vec<StoredDocument> {
    let mut metadatas = metadatas.into_iter();
    documents
        .into_iter()
        .filter_map(|text| {
            let metadata = metadatas.next().flatten().unwrap_or_default();
            text.map(|text| StoredDocument::new(text, metadata))
        })
        .collect()
}

#[async_trait]
impl DocumentStore for ChromaStore {
    async fn get_by_country(
        &self,
        country: &str,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let body = GetRequest {
            filter: json!({ "country": country }),
            limit,
            include: INCLUDE,
        };
        let response = self
            .client
            .post(self.collection_url("get"))
            .json(&body)
            .send()
            .await
            .map_err(StoreError::Request)?;
        let result: GetResponse = read_json(response).await?;
        let documents = zip_documents(result.documents, result.metadatas);
        debug!(country, count = documents.len(), "Fetched documents by country");
        Ok(documents)
    }

    async fn vector_query(
        &self,
        text: &str,
        k: usize,
        country: Option<&str>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let embedding = generate_embedding(
            &self.client,
            &self.embedding.api_url,
            &self.embedding.model,
            text,
            self.embedding.api_key.as_deref(),
        )
        .await
        .map_err(StoreError::Embedding)?;

        let body = QueryRequest {
            query_embeddings: vec![embedding],
            n_results: k,
            filter: country.map(|c| json!({ "country": c })),
            include: INCLUDE,
        };
        let response = self
            .client
            .post(self.collection_url("query"))
            .json(&body)
            .send()
            .await
            .map_err(StoreError::Request)?;
        let result: QueryResponse = read_json(response).await?;

        let documents = result
            .documents
            .and_then(|rows| rows.into_iter().next())
            .unwrap_or_default();
        let metadatas = result
            .metadatas
            .and_then(|rows| rows.into_iter().next())
            .unwrap_or_default();
        let documents = zip_documents(documents, metadatas);
        debug!(?country, k, count = documents.len(), "Vector query returned");
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentType;

    #[test]
    fn zip_skips_missing_text_and_defaults_missing_metadata() {
        let documents = vec![Some("a".to_string()), None, Some("c".to_string())];
        let metadatas = vec![
            Some(DocumentMetadata {
                country: Some("巴西".to_string()),
                title: "t".to_string(),
                url: String::new(),
                doc_type: DocumentType::Ocr,
            }),
            None,
        ];
        let zipped = zip_documents(documents, metadatas);
        assert_eq!(zipped.len(), 2);
        assert_eq!(zipped[0].metadata.country.as_deref(), Some("巴西"));
        assert!(zipped[0].is_ocr());
        assert_eq!(zipped[1].text, "c");
        assert_eq!(zipped[1].metadata.country, None);
    }
}
