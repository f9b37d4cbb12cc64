//! Stored vector records.
//!
//! A [`VectorRecord`] is the unit of storage: an id, dense values, an
//! optional sparse representation, and optional metadata. Field names follow
//! the Pinecone wire contract so records can be decoded straight from
//! request bodies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Arbitrary JSON-representable metadata attached to a record.
pub type Metadata = HashMap<String, serde_json::Value>;

/// Sparse representation of a vector: parallel index/value arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseValues {
    pub indices: Vec<i64>,
    pub values: Vec<f32>,
}

/// One stored vector.
///
/// The declared index dimension is not enforced against `values`; the store
/// emulates the API shape, not the math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    #[serde(default)]
    pub values: Vec<f32>,
    #[serde(
        rename = "sparseValues",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sparse_values: Option<SparseValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl VectorRecord {
    /// Create a record with dense values only.
    pub fn new(id: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            values,
            sparse_values: None,
            metadata: None,
        }
    }

    /// Attach metadata, builder style.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Apply a partial update in place.
    ///
    /// New values, when present, replace the old ones wholesale; there is no
    /// elementwise merge. Metadata keys named in the patch are inserted or
    /// overwritten, keys not named are preserved. A record without metadata
    /// takes the patch's metadata as-is. This operation is total.
    pub fn merge(&mut self, values: Option<Vec<f32>>, set_metadata: Option<Metadata>) {
        if let Some(values) = values {
            self.values = values;
        }
        if let Some(patch) = set_metadata {
            match self.metadata.as_mut() {
                Some(existing) => existing.extend(patch),
                None => self.metadata = Some(patch),
            }
        }
    }
}
