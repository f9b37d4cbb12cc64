//! Wire response types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::index::IndexDescriptor;
use crate::record::{Metadata, VectorRecord};

/// Body of `GET /indexes`: zero or one descriptor under a named list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexListResponse {
    pub indexes: Vec<IndexDescriptor>,
}

/// Body of `POST /describe_index_stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub dimension: u32,
    /// Sum of record counts across all namespaces.
    #[serde(rename = "totalVectorCount")]
    pub total_vector_count: usize,
}

/// Body of `POST /vectors/upsert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertResponse {
    /// Number of records processed, equal to the input length. Duplicate ids
    /// in one request are each counted; the last write wins in the store.
    #[serde(rename = "upsertedCount")]
    pub upserted_count: usize,
}

/// Read-unit accounting attached to query-like responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(rename = "readUnits")]
    pub read_units: usize,
}

/// One query match. The score is a fixed placeholder, never derived from
/// the query vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatch {
    pub id: String,
    pub score: f32,
    pub values: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body of `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub matches: Vec<VectorMatch>,
    pub namespace: String,
    pub usage: Usage,
}

/// Body of `GET /vectors/fetch`: found records keyed by id. Missing ids are
/// skipped, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResponse {
    pub vectors: HashMap<String, VectorRecord>,
    pub namespace: String,
    pub usage: Usage,
}

/// One entry of a list-ids response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdEntry {
    pub id: String,
}

/// Body of `GET /vectors/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub vectors: Vec<IdEntry>,
    pub namespace: String,
    pub usage: Usage,
}
