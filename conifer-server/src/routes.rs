//! Request handlers.
//!
//! Each handler takes the shared store lock, calls exactly one store
//! operation, and encodes the result. Decode failures are rejected by axum
//! before a handler runs and never reach the store.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::Query;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tracing::{debug, info};

use conifer::request::{
    CreateIndexRequest, DeleteRequest, FetchParams, ListParams, QueryRequest, UpdateRequest,
    UpsertRequest,
};
use conifer::{ConiferError, IndexStore};

/// The single exclusion boundary around the store. Every handler holds the
/// lock for the duration of one operation; all operations are in-memory and
/// never block on I/O.
pub type SharedStore = Arc<Mutex<IndexStore>>;

fn error_response(err: ConiferError) -> Response {
    let status = match &err {
        ConiferError::NotFound(_) => StatusCode::NOT_FOUND,
        ConiferError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ConiferError::Unimplemented(_) => StatusCode::NOT_IMPLEMENTED,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

pub async fn create_index(
    State(store): State<SharedStore>,
    Json(request): Json<CreateIndexRequest>,
) -> impl IntoResponse {
    info!(name = %request.name, dimension = request.dimension, "create index");
    let descriptor = store.lock().create_index(request);
    (StatusCode::CREATED, Json(descriptor))
}

pub async fn list_indexes(State(store): State<SharedStore>) -> impl IntoResponse {
    Json(store.lock().list_indexes())
}

pub async fn get_index(State(store): State<SharedStore>, Path(name): Path<String>) -> Response {
    let store = store.lock();
    match store.get_index() {
        Ok(descriptor) if descriptor.name == name => Json(descriptor.clone()).into_response(),
        Ok(_) => error_response(ConiferError::NotFound(format!("index not found: {name}"))),
        Err(err) => error_response(err),
    }
}

/// The request body is accepted and ignored; the mock keeps no per-filter
/// statistics.
pub async fn describe_stats(State(store): State<SharedStore>) -> Response {
    match store.lock().describe_stats() {
        Ok(stats) => Json(stats).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn upsert(
    State(store): State<SharedStore>,
    Json(request): Json<UpsertRequest>,
) -> Response {
    match store.lock().upsert(&request.namespace, request.vectors) {
        Ok(count) => (
            StatusCode::CREATED,
            Json(conifer::response::UpsertResponse {
                upserted_count: count,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn query(State(store): State<SharedStore>, Json(request): Json<QueryRequest>) -> Response {
    if request.filter.is_some() {
        debug!("query filter accepted but not evaluated");
    }
    match store.lock().query(&request.namespace, request.top_k) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn fetch(State(store): State<SharedStore>, Query(params): Query<FetchParams>) -> Response {
    match store.lock().fetch(&params.namespace, &params.ids) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn update(
    State(store): State<SharedStore>,
    Json(request): Json<UpdateRequest>,
) -> Response {
    match store.lock().update(request) {
        // The wire contract returns an empty object on success.
        Ok(()) => Json(json!({})).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn delete(
    State(store): State<SharedStore>,
    Json(request): Json<DeleteRequest>,
) -> Response {
    match store.lock().delete(request) {
        Ok(()) => Json(json!({})).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn list(State(store): State<SharedStore>, Query(params): Query<ListParams>) -> Response {
    match store.lock().list_ids(&params.namespace, &params.prefix) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(err),
    }
}

/// Catch-all for unrouted paths, useful when pointing real clients at the
/// mock: POSTed JSON is logged and echoed back, GETs get their query
/// parameters and headers reflected.
pub async fn fallback(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    if method == Method::POST {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => {
                info!(path = %uri.path(), body = %value, "unrouted request echoed");
                Json(value).into_response()
            }
            Err(_) => error_response(ConiferError::BadRequest("invalid JSON body".to_string())),
        }
    } else if method == Method::GET {
        let mut response = serde_json::Map::new();
        if let Some(raw) = uri.query() {
            let mut params: HashMap<String, Vec<String>> = HashMap::new();
            for pair in raw.split('&').filter(|pair| !pair.is_empty()) {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                params
                    .entry(key.to_string())
                    .or_default()
                    .push(value.to_string());
            }
            let params = params
                .into_iter()
                .map(|(key, values)| {
                    (
                        key,
                        Value::Array(values.into_iter().map(Value::String).collect()),
                    )
                })
                .collect();
            response.insert("query_parameters".to_string(), Value::Object(params));
        }
        let header_map: serde_json::Map<String, Value> = headers
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
                )
            })
            .collect();
        response.insert("headers".to_string(), Value::Object(header_map));
        Json(Value::Object(response)).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
