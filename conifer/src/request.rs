//! Wire request types.
//!
//! Field names mirror the Pinecone REST contract (camelCase where the
//! service uses it) so these types decode directly from request bodies and
//! query strings. Fields the mock accepts but does not honor (`filter`,
//! `vector`, `includeValues`, `includeMetadata`) are kept so that real
//! client payloads decode cleanly.

use serde::{Deserialize, Serialize};

use crate::index::IndexStatus;
use crate::record::{Metadata, VectorRecord};

/// Body of `POST /indexes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIndexRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dimension: u32,
    /// Defaults to `"cosine"` when empty or absent.
    #[serde(default)]
    pub metric: String,
    /// Defaults to ready/"Ready" when absent.
    #[serde(default)]
    pub status: Option<IndexStatus>,
}

/// Body of `POST /vectors/upsert`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertRequest {
    #[serde(default)]
    pub vectors: Vec<VectorRecord>,
    #[serde(default)]
    pub namespace: String,
}

/// Body of `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub namespace: String,
    /// Non-positive values yield an empty result.
    #[serde(rename = "topK", default)]
    pub top_k: i64,
    /// Accepted but unused: the mock never scores against the query vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f32>>,
    /// Accepted but unused: metadata predicates are not evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<serde_json::Value>,
    #[serde(rename = "includeValues", default)]
    pub include_values: bool,
    #[serde(rename = "includeMetadata", default)]
    pub include_metadata: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Body of `POST /vectors/update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f32>>,
    /// Metadata keys to set (insert or overwrite) on the target record.
    #[serde(rename = "metadata", default, skip_serializing_if = "Option::is_none")]
    pub set_metadata: Option<Metadata>,
    #[serde(default)]
    pub namespace: String,
}

/// Body of `POST /vectors/delete`.
///
/// Exactly one of `ids` or `deleteAll` must be given. The `namespace` field
/// here is authoritative; there is no separate namespace argument.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    #[serde(rename = "deleteAll", default)]
    pub delete_all: bool,
    #[serde(default)]
    pub namespace: String,
    /// Metadata-filtered deletion is not implemented; a request carrying a
    /// filter is rejected rather than silently misapplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<serde_json::Value>,
}

/// Query string of `GET /vectors/fetch` (`ids` may repeat).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchParams {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub namespace: String,
}

/// Query string of `GET /vectors/list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub namespace: String,
    /// Keep only ids starting with this prefix; empty means no filtering.
    #[serde(default)]
    pub prefix: String,
}
