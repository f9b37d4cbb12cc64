//! Index-level descriptor types.

use serde::{Deserialize, Serialize};

/// Readiness of an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStatus {
    pub ready: bool,
    pub state: String,
}

impl Default for IndexStatus {
    fn default() -> Self {
        Self {
            ready: true,
            state: "Ready".to_string(),
        }
    }
}

/// Placeholder for the deployment spec block of the wire contract.
///
/// Serializes as an empty object; the mock carries it for shape
/// compatibility only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpec {}

/// The index descriptor returned by create/get/list operations.
///
/// `dimension` is declared once at creation and never revalidated against
/// inserted vectors. `host` is assigned by the server, not the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    pub name: String,
    pub dimension: u32,
    pub metric: String,
    pub status: IndexStatus,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub spec: IndexSpec,
}
