use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use super::{build_router, shared_store};

const TEST_HOST: &str = "http://localhost:8080";

fn app() -> Router {
    build_router(shared_store(TEST_HOST))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(content) => {
            builder = builder.header("content-type", "application/json");
            Body::from(content.to_string())
        }
        None => Body::empty(),
    };
    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

async fn body_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_demo_index(app: &Router) {
    let resp = send(
        app,
        "POST",
        "/indexes",
        Some(r#"{"name":"demo","dimension":3}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_and_get_index() {
    let app = app();
    create_demo_index(&app).await;

    let resp = send(&app, "GET", "/indexes", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    let indexes = json["indexes"].as_array().unwrap();
    assert_eq!(indexes.len(), 1);
    assert_eq!(indexes[0]["name"], "demo");
    assert_eq!(indexes[0]["metric"], "cosine");
    assert_eq!(indexes[0]["host"], TEST_HOST);
    assert_eq!(indexes[0]["status"]["ready"], true);

    let resp = send(&app, "GET", "/indexes/demo", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["dimension"], 3);
    assert_eq!(json["spec"], serde_json::json!({}));

    let resp = send(&app, "GET", "/indexes/other", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_indexes_empty_before_create() {
    let app = app();
    let resp = send(&app, "GET", "/indexes", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["indexes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_stats_require_an_index() {
    let app = app();

    let resp = send(&app, "POST", "/describe_index_stats", Some("{}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    create_demo_index(&app).await;
    let resp = send(&app, "POST", "/describe_index_stats", Some("{}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["dimension"], 3);
    assert_eq!(json["totalVectorCount"], 0);
}

#[tokio::test]
async fn test_upsert_and_query_flow() {
    let app = app();
    create_demo_index(&app).await;

    let resp = send(
        &app,
        "POST",
        "/vectors/upsert",
        Some(
            r#"{"namespace":"a","vectors":[
                {"id":"v1","values":[0,0,1],"metadata":{"genre":"drama"}},
                {"id":"v2","values":[0,1,0]}
            ]}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["upsertedCount"], 2);

    let resp = send(
        &app,
        "POST",
        "/query",
        Some(r#"{"namespace":"a","topK":5,"vector":[0,0,1],"includeMetadata":true}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    let matches = json["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    for m in matches {
        assert_eq!(m["score"], 0.9);
    }
    assert_eq!(json["namespace"], "a");
    assert_eq!(json["usage"]["readUnits"], 2);

    // Unknown namespace yields empty matches, not an error.
    let resp = send(
        &app,
        "POST",
        "/query",
        Some(r#"{"namespace":"missing","topK":5}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["matches"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_query_respects_top_k() {
    let app = app();
    create_demo_index(&app).await;

    let vectors: Vec<String> = (0..10)
        .map(|i| format!(r#"{{"id":"v{i}","values":[{i}]}}"#))
        .collect();
    let body = format!(r#"{{"namespace":"a","vectors":[{}]}}"#, vectors.join(","));
    let resp = send(&app, "POST", "/vectors/upsert", Some(&body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = send(&app, "POST", "/query", Some(r#"{"namespace":"a","topK":3}"#)).await;
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["matches"].as_array().unwrap().len(), 3);

    let resp = send(&app, "POST", "/query", Some(r#"{"namespace":"a","topK":0}"#)).await;
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["matches"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_fetch_with_repeated_ids() {
    let app = app();
    create_demo_index(&app).await;

    let _ = send(
        &app,
        "POST",
        "/vectors/upsert",
        Some(r#"{"namespace":"a","vectors":[{"id":"v1","values":[1]},{"id":"v2","values":[2]}]}"#),
    )
    .await;

    let resp = send(
        &app,
        "GET",
        "/vectors/fetch?ids=v1&ids=v2&ids=ghost&namespace=a",
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    let vectors = json["vectors"].as_object().unwrap();
    assert_eq!(vectors.len(), 2);
    assert_eq!(vectors["v1"]["values"], serde_json::json!([1.0]));
    assert_eq!(json["usage"]["readUnits"], 2);
}

#[tokio::test]
async fn test_update_merges_metadata() {
    let app = app();
    create_demo_index(&app).await;

    let _ = send(
        &app,
        "POST",
        "/vectors/upsert",
        Some(r#"{"namespace":"a","vectors":[{"id":"v1","values":[1,2,3],"metadata":{"a":1,"b":2}}]}"#),
    )
    .await;

    let resp = send(
        &app,
        "POST",
        "/vectors/update",
        Some(r#"{"namespace":"a","id":"v1","metadata":{"b":3,"c":4}}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json, serde_json::json!({}));

    let resp = send(&app, "GET", "/vectors/fetch?ids=v1&namespace=a", None).await;
    let json = body_json(resp.into_body()).await;
    assert_eq!(
        json["vectors"]["v1"]["metadata"],
        serde_json::json!({"a": 1, "b": 3, "c": 4})
    );
    // Values untouched by a metadata-only update.
    assert_eq!(json["vectors"]["v1"]["values"], serde_json::json!([1.0, 2.0, 3.0]));
}

#[tokio::test]
async fn test_update_missing_vector_is_404() {
    let app = app();
    create_demo_index(&app).await;

    let resp = send(
        &app,
        "POST",
        "/vectors/update",
        Some(r#"{"namespace":"a","id":"ghost","values":[1,2,3]}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_validation_and_filter() {
    let app = app();
    create_demo_index(&app).await;

    let resp = send(&app, "POST", "/vectors/delete", Some("{}")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("deleteAll"));

    let resp = send(
        &app,
        "POST",
        "/vectors/delete",
        Some(r#"{"ids":["v1"],"filter":{"genre":{"$eq":"drama"}}}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn test_delete_all_scoping_over_http() {
    let app = app();
    create_demo_index(&app).await;

    let _ = send(
        &app,
        "POST",
        "/vectors/upsert",
        Some(r#"{"namespace":"ns1","vectors":[{"id":"v1","values":[1]}]}"#),
    )
    .await;
    let _ = send(
        &app,
        "POST",
        "/vectors/upsert",
        Some(r#"{"namespace":"ns2","vectors":[{"id":"v2","values":[2]}]}"#),
    )
    .await;

    let resp = send(
        &app,
        "POST",
        "/vectors/delete",
        Some(r#"{"deleteAll":true,"namespace":"ns1"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, "POST", "/describe_index_stats", Some("{}")).await;
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["totalVectorCount"], 1);
}

#[tokio::test]
async fn test_delete_ids_then_fetch_is_empty() {
    let app = app();
    create_demo_index(&app).await;

    let _ = send(
        &app,
        "POST",
        "/vectors/upsert",
        Some(r#"{"namespace":"a","vectors":[{"id":"v1","values":[0,0,1]}]}"#),
    )
    .await;

    let resp = send(
        &app,
        "POST",
        "/vectors/delete",
        Some(r#"{"ids":["v1"],"namespace":"a"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, "GET", "/vectors/fetch?ids=v1&namespace=a", None).await;
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["vectors"].as_object().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_ids_with_prefix() {
    let app = app();
    create_demo_index(&app).await;

    let _ = send(
        &app,
        "POST",
        "/vectors/upsert",
        Some(
            r#"{"namespace":"a","vectors":[
                {"id":"doc-1","values":[1]},
                {"id":"doc-2","values":[2]},
                {"id":"img-1","values":[3]}
            ]}"#,
        ),
    )
    .await;

    let resp = send(&app, "GET", "/vectors/list?namespace=a&prefix=doc-", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    let vectors = json["vectors"].as_array().unwrap();
    assert_eq!(vectors.len(), 2);
    assert!(vectors.iter().all(|v| v["id"].as_str().unwrap().starts_with("doc-")));
    assert_eq!(json["namespace"], "a");
}

#[tokio::test]
async fn test_vector_ops_before_create_index_are_404() {
    let app = app();

    let resp = send(
        &app,
        "POST",
        "/vectors/upsert",
        Some(r#"{"namespace":"a","vectors":[{"id":"v1","values":[1]}]}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, "POST", "/query", Some(r#"{"namespace":"a","topK":5}"#)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_is_a_client_error() {
    let app = app();
    create_demo_index(&app).await;

    let resp = send(&app, "POST", "/vectors/upsert", Some("{not json")).await;
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn test_fallback_echoes_posted_json() {
    let app = app();

    let resp = send(
        &app,
        "POST",
        "/some/unrouted/path",
        Some(r#"{"hello":"world"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["hello"], "world");

    let resp = send(&app, "POST", "/some/unrouted/path", Some("not json")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_fallback_reflects_get_requests() {
    let app = app();

    let resp = send(&app, "GET", "/unrouted?foo=bar&foo=baz&x=1", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["query_parameters"]["foo"], serde_json::json!(["bar", "baz"]));
    assert_eq!(json["query_parameters"]["x"], serde_json::json!(["1"]));
}
