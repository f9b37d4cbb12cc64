//! HTTP adapter for the conifer index store.
//!
//! Translates the Pinecone-style REST surface into store operations. The
//! store sits behind one coarse mutex; handlers lock it per request, so
//! namespace mutation and iteration never interleave across connections.

pub mod config;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use parking_lot::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use conifer::IndexStore;

pub use config::Config;
pub use routes::SharedStore;

/// Build a store ready to be shared across handlers.
pub fn shared_store(advertised_host: impl Into<String>) -> SharedStore {
    Arc::new(Mutex::new(IndexStore::new(advertised_host)))
}

/// Assemble the full routing table over a shared store.
pub fn build_router(store: SharedStore) -> Router {
    Router::new()
        .route("/indexes", post(routes::create_index).get(routes::list_indexes))
        .route("/indexes/{name}", get(routes::get_index))
        .route("/describe_index_stats", post(routes::describe_stats))
        .route("/vectors/upsert", post(routes::upsert))
        .route("/query", post(routes::query))
        .route("/vectors/fetch", get(routes::fetch))
        .route("/vectors/update", post(routes::update))
        .route("/vectors/delete", post(routes::delete))
        .route("/vectors/list", get(routes::list))
        .fallback(routes::fallback)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

#[cfg(test)]
mod tests;
