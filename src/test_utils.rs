//! Router-level test helpers.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::config::Config;
use crate::llm::LlmClient;
use crate::routine_store::{CsvRoutineStore, RoutineStore};
use crate::{build_router, AppState};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _dir: TempDir,
}

pub fn test_app() -> TestApp {
    test_app_with(|_| {})
}

/// App whose LLM client points at `base_url` with a dummy key.
pub fn test_app_with_llm(base_url: &str) -> TestApp {
    let base_url = base_url.to_string();
    test_app_with(move |config| {
        config.llm_base_url = base_url;
        config.llm_api_key = "test-key".into();
    })
}

pub fn test_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut config = Config::for_tests(dir.path().join("routines.csv"));
    configure(&mut config);

    let config = Arc::new(config);
    let routines: Arc<dyn RoutineStore> = Arc::new(CsvRoutineStore::new(&config.routine_file));
    let llm = LlmClient::new(&config).expect("llm client");
    let state = AppState::new(config, routines, llm);

    TestApp {
        router: build_router(state.clone()),
        state,
        _dir: dir,
    }
}

fn with_peer(mut req: Request<Body>) -> Request<Body> {
    let peer: SocketAddr = "127.0.0.1:40000".parse().expect("socket addr");
    req.extensions_mut().insert(ConnectInfo(peer));
    req
}

pub async fn send(router: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = router
        .clone()
        .oneshot(with_peer(req))
        .await
        .expect("router response");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("response body")
        .to_bytes()
        .to_vec();
    (status, headers, bytes)
}

// Extractor rejections come back as plain text.
fn parse_json(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let (status, _, bytes) = send(router, req).await;
    (status, parse_json(&bytes))
}

pub async fn get_text(router: &Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    let req = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let (status, headers, bytes) = send(router, req).await;
    (status, headers, String::from_utf8(bytes).expect("utf-8 body"))
}

pub async fn send_json(router: &Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    let (status, _, bytes) = send(router, req).await;
    (status, parse_json(&bytes))
}

pub async fn delete(router: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let (status, _, bytes) = send(router, req).await;
    (status, parse_json(&bytes))
}
