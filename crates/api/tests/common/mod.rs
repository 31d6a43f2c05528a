#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use autolist_api::config::ServerConfig;
use autolist_api::router::build_app_router;
use autolist_api::state::AppState;
use autolist_core::automation::Automation;
use autolist_core::pipeline::RecordSource;
use autolist_db::MemorySource;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_path: "unused.json".into(),
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over the given record source.
pub fn build_test_app(source: impl RecordSource + 'static) -> Router {
    build_app_router(AppState::new(source), &test_config())
}

/// Router over the three standard fixture records.
pub fn fixture_app() -> Router {
    build_test_app(MemorySource::new(fixtures()))
}

/// The three records used across listing tests.
pub fn fixtures() -> Vec<Automation> {
    serde_json::from_value(fixtures_json()).expect("fixtures should deserialize")
}

pub fn fixtures_json() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "1",
            "name": "Test Automation 1",
            "type": "robot",
            "creationTime": "2023-01-01T00:00:00.000Z",
            "status": "active"
        },
        {
            "id": "2",
            "name": "Test Automation 2",
            "type": "flow",
            "creationTime": "2023-01-02T00:00:00.000Z",
            "status": "inactive"
        },
        {
            "id": "3",
            "name": "Another Test",
            "type": "application",
            "creationTime": "2023-01-03T00:00:00.000Z",
            "status": "active"
        }
    ])
}

/// Send a GET request through the router without a TCP listener.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("router is infallible")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Collect a response body as UTF-8 text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

/// Names of the records in a listing response, in order.
pub fn names(json: &serde_json::Value) -> Vec<String> {
    json["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|r| r["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
