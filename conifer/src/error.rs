use thiserror::Error;

/// Errors surfaced by the index store.
///
/// Decode and transport failures belong to the adapter layer and never reach
/// the store. Missing-but-plausible state (an empty or absent namespace, an
/// unknown id in a fetch) is not an error; only invalid preconditions are.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConiferError {
    /// The index has not been created yet, or a lookup target does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request is structurally invalid.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The operation is recognized but intentionally unsupported.
    #[error("unimplemented: {0}")]
    Unimplemented(String),
}

/// Result type alias using [`ConiferError`].
pub type Result<T> = std::result::Result<T, ConiferError>;
