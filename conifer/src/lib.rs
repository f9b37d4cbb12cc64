//! # Conifer
//!
//! An in-memory stand-in for a hosted vector-database service. It accepts
//! vectors tagged with identifiers and optional metadata, organizes them
//! into named namespaces within a single index, and answers retrieval
//! requests with the real service's response shapes — without doing any
//! similarity math. Use it to exercise the full request/response contract
//! of client code against a fast, dependency-light mock.
//!
//! ## What it deliberately does not do
//!
//! - No distance or similarity computation: match scores are a fixed
//!   placeholder.
//! - No persistence: state lives and dies with the process.
//! - No dimension validation, metadata filtering, or sparse scoring.

mod error;
mod index;
mod namespace;
mod record;
pub mod request;
pub mod response;
mod store;

pub use error::{ConiferError, Result};
pub use index::{IndexDescriptor, IndexSpec, IndexStatus};
pub use namespace::Namespace;
pub use record::{Metadata, SparseValues, VectorRecord};
pub use store::{IndexStore, PLACEHOLDER_SCORE};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
