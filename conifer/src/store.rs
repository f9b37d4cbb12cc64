//! The in-memory index store.
//!
//! [`IndexStore`] owns at most one index and its namespaces, and exposes the
//! full CRUD/query contract of the service. It has two states: uninitialized
//! (before `create_index`) and ready. Every operation other than
//! `create_index` and `list_indexes` reports `NotFound` while uninitialized
//! rather than faulting.
//!
//! The store is a pure synchronous state machine: no I/O, no background
//! tasks. Callers serving concurrent requests must wrap it in a single
//! exclusion boundary (one mutex around the whole store); namespace
//! creation, insertion, and iteration-based queries and deletes must not
//! interleave.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ConiferError, Result};
use crate::index::{IndexDescriptor, IndexSpec, IndexStatus};
use crate::namespace::Namespace;
use crate::record::VectorRecord;
use crate::request::{CreateIndexRequest, DeleteRequest, UpdateRequest};
use crate::response::{
    FetchResponse, IdEntry, IndexListResponse, ListResponse, QueryResponse, StatsResponse, Usage,
    VectorMatch,
};

/// Score attached to every query match. Fixed by design: the mock emulates
/// the response shape, not similarity math.
pub const PLACEHOLDER_SCORE: f32 = 0.9;

const DEFAULT_METRIC: &str = "cosine";

struct IndexState {
    descriptor: IndexDescriptor,
    namespaces: HashMap<String, Namespace>,
}

/// The single-index vector store.
///
/// Construct one per server with the advertised host and share it behind a
/// lock; there is no ambient singleton.
pub struct IndexStore {
    host: String,
    index: Option<IndexState>,
}

impl IndexStore {
    /// Create an uninitialized store advertising `host` in descriptors.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            index: None,
        }
    }

    fn state(&self) -> Result<&IndexState> {
        self.index
            .as_ref()
            .ok_or_else(|| ConiferError::NotFound("index has not been created".to_string()))
    }

    fn state_mut(&mut self) -> Result<&mut IndexState> {
        self.index
            .as_mut()
            .ok_or_else(|| ConiferError::NotFound("index has not been created".to_string()))
    }

    /// Create (or wholesale-replace) the index, applying defaults for
    /// unspecified metric and status. Returns the materialized descriptor.
    pub fn create_index(&mut self, request: CreateIndexRequest) -> IndexDescriptor {
        let metric = if request.metric.is_empty() {
            DEFAULT_METRIC.to_string()
        } else {
            request.metric
        };
        let descriptor = IndexDescriptor {
            name: request.name,
            dimension: request.dimension,
            metric,
            status: request.status.unwrap_or_default(),
            host: self.host.clone(),
            spec: IndexSpec::default(),
        };
        debug!(name = %descriptor.name, dimension = descriptor.dimension, "index created");
        self.index = Some(IndexState {
            descriptor: descriptor.clone(),
            namespaces: HashMap::new(),
        });
        descriptor
    }

    /// List the zero or one index this store owns.
    pub fn list_indexes(&self) -> IndexListResponse {
        IndexListResponse {
            indexes: self
                .index
                .as_ref()
                .map(|state| vec![state.descriptor.clone()])
                .unwrap_or_default(),
        }
    }

    /// The current descriptor, or `NotFound` before `create_index`.
    pub fn get_index(&self) -> Result<&IndexDescriptor> {
        Ok(&self.state()?.descriptor)
    }

    /// Dimension plus the total record count across all namespaces.
    pub fn describe_stats(&self) -> Result<StatsResponse> {
        let state = self.state()?;
        let total = state.namespaces.values().map(Namespace::len).sum();
        Ok(StatsResponse {
            dimension: state.descriptor.dimension,
            total_vector_count: total,
        })
    }

    /// Insert an empty namespace if absent. Idempotent.
    pub fn create_namespace(&mut self, name: &str) -> Result<()> {
        let state = self.state_mut()?;
        state.namespaces.entry(name.to_string()).or_default();
        Ok(())
    }

    /// Insert or replace each record by id in `namespace`, creating the
    /// namespace on first use. Returns the number of records processed.
    pub fn upsert(&mut self, namespace: &str, vectors: Vec<VectorRecord>) -> Result<usize> {
        let state = self.state_mut()?;
        let count = vectors.len();
        let ns = state.namespaces.entry(namespace.to_string()).or_default();
        for record in vectors {
            ns.upsert(record);
        }
        debug!(namespace, count, "vectors upserted");
        Ok(count)
    }

    /// Take up to `top_k` records from `namespace` (or from every namespace
    /// when `namespace` is empty) in unspecified order, each carrying the
    /// placeholder score. An unknown namespace yields empty matches, not an
    /// error. `top_k <= 0` yields an empty result.
    pub fn query(&self, namespace: &str, top_k: i64) -> Result<QueryResponse> {
        let state = self.state()?;
        let limit = usize::try_from(top_k).unwrap_or(0);

        let mut matches = Vec::new();
        if limit > 0 {
            if namespace.is_empty() {
                for ns in state.namespaces.values() {
                    for record in ns.records() {
                        if matches.len() == limit {
                            break;
                        }
                        matches.push(to_match(record));
                    }
                }
            } else if let Some(ns) = state.namespaces.get(namespace) {
                matches.extend(ns.records().take(limit).map(to_match));
            }
        }

        let read_units = matches.len();
        Ok(QueryResponse {
            matches,
            namespace: namespace.to_string(),
            usage: Usage { read_units },
        })
    }

    /// Look up each id in `namespace` (or across every namespace when empty)
    /// and return the records found, keyed by id. Missing ids are skipped.
    pub fn fetch(&self, namespace: &str, ids: &[String]) -> Result<FetchResponse> {
        let state = self.state()?;
        let mut vectors = HashMap::new();
        for id in ids {
            let found = if namespace.is_empty() {
                state.namespaces.values().find_map(|ns| ns.get(id))
            } else {
                state.namespaces.get(namespace).and_then(|ns| ns.get(id))
            };
            if let Some(record) = found {
                vectors.insert(id.clone(), record.clone());
            }
        }
        let read_units = vectors.len();
        Ok(FetchResponse {
            vectors,
            namespace: namespace.to_string(),
            usage: Usage { read_units },
        })
    }

    /// Apply a partial update to one record, per the merge contract on
    /// [`VectorRecord::merge`]. `NotFound` when the namespace or id is
    /// absent.
    pub fn update(&mut self, request: UpdateRequest) -> Result<()> {
        let state = self.state_mut()?;
        let ns = state.namespaces.get_mut(&request.namespace).ok_or_else(|| {
            ConiferError::NotFound(format!("namespace not found: {}", request.namespace))
        })?;
        let record = ns
            .get_mut(&request.id)
            .ok_or_else(|| ConiferError::NotFound(format!("vector not found: {}", request.id)))?;
        record.merge(request.values, request.set_metadata);
        Ok(())
    }

    /// Delete by ids or clear whole namespaces.
    ///
    /// Exactly one of `ids` or `deleteAll` must be given. A specified
    /// namespace scopes the deletion to that namespace; an empty namespace
    /// applies it to every namespace (ids are not assumed globally unique).
    /// Past validation the operation never fails: unknown namespaces and
    /// absent ids are no-ops.
    pub fn delete(&mut self, request: DeleteRequest) -> Result<()> {
        if request.filter.is_some() {
            return Err(ConiferError::Unimplemented(
                "metadata-filtered deletion is not supported".to_string(),
            ));
        }
        if request.ids.is_some() == request.delete_all {
            return Err(ConiferError::BadRequest(
                "exactly one of `ids` or `deleteAll` must be provided".to_string(),
            ));
        }
        let state = self.state_mut()?;
        let namespace = request.namespace;

        match request.ids {
            None => {
                // deleteAll: empty the targeted namespaces, keep them present.
                if namespace.is_empty() {
                    for ns in state.namespaces.values_mut() {
                        ns.clear();
                    }
                } else if let Some(ns) = state.namespaces.get_mut(&namespace) {
                    ns.clear();
                }
                debug!(namespace = %namespace, "delete-all applied");
            }
            Some(ids) => {
                if namespace.is_empty() {
                    for ns in state.namespaces.values_mut() {
                        for id in &ids {
                            ns.remove(id);
                        }
                    }
                } else if let Some(ns) = state.namespaces.get_mut(&namespace) {
                    for id in &ids {
                        ns.remove(id);
                    }
                }
                debug!(namespace = %namespace, count = ids.len(), "vectors deleted");
            }
        }
        Ok(())
    }

    /// List ids in `namespace` (or every namespace when empty), keeping only
    /// ids starting with `prefix` (empty prefix keeps everything). An
    /// unknown namespace yields an empty list, not an error. Order is
    /// unspecified.
    pub fn list_ids(&self, namespace: &str, prefix: &str) -> Result<ListResponse> {
        let state = self.state()?;
        let mut vectors = Vec::new();
        let mut push_ids = |ns: &Namespace| {
            vectors.extend(
                ns.ids()
                    .filter(|id| prefix.is_empty() || id.starts_with(prefix))
                    .map(|id| IdEntry { id: id.to_string() }),
            );
        };
        if namespace.is_empty() {
            for ns in state.namespaces.values() {
                push_ids(ns);
            }
        } else if let Some(ns) = state.namespaces.get(namespace) {
            push_ids(ns);
        }
        let read_units = vectors.len();
        Ok(ListResponse {
            vectors,
            namespace: namespace.to_string(),
            usage: Usage { read_units },
        })
    }
}

fn to_match(record: &VectorRecord) -> VectorMatch {
    VectorMatch {
        id: record.id.clone(),
        score: PLACEHOLDER_SCORE,
        values: record.values.clone(),
        metadata: record.metadata.clone(),
    }
}
