//! # Shared Constants
//!
//! Values shared by the library and the server.

/// The Chroma collection the knowledge-base builder writes to.
pub const DEFAULT_COLLECTION_NAME: &str = "country_employment_guides";

/// The embedding model the corpus was indexed with. Query vectors must come
/// from the same model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// The `source` tag returned by the web-search endpoint.
pub const WEB_SEARCH_SOURCE: &str = "deepseek_search";

/// Returned when there is nothing to answer from.
pub const NO_CONTEXT_ANSWER: &str = "抱歉，未找到相关信息。";
