//! Named partitions of an index.

use std::collections::HashMap;
use std::collections::hash_map::Values;

use serde::{Deserialize, Serialize};

use crate::record::VectorRecord;

/// A namespace: a mapping from vector id to record.
///
/// Namespaces isolate id spaces within one index. The empty string is a
/// valid, distinct namespace key; request parameters use it to mean
/// "unspecified". Records are never shared across namespaces.
///
/// Iteration order over records is unspecified and may differ across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Namespace {
    records: HashMap<String, VectorRecord>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or wholesale-replace a record by id.
    pub fn upsert(&mut self, record: VectorRecord) {
        self.records.insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<&VectorRecord> {
        self.records.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut VectorRecord> {
        self.records.get_mut(id)
    }

    /// Remove a record by id. A missing id is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<VectorRecord> {
        self.records.remove(id)
    }

    /// Drop every record, keeping the namespace itself.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> Values<'_, String, VectorRecord> {
        self.records.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}
