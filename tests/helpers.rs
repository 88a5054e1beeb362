#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use std::sync::Arc;
use tower::ServiceExt;

use policy_relay::{
    AppState,
    config::{CachePolicy, Config, PoliciesMode},
    create_router,
    fetcher::HttpFetcher,
};

pub fn config(
    app_ads_url: Option<String>,
    policies_url: Option<String>,
    mode: PoliciesMode,
    cache_policy: CachePolicy,
) -> Config {
    Config::new("127.0.0.1:0", app_ads_url, policies_url, mode, cache_policy)
}

pub fn test_app(config: Config) -> Router {
    let upstream = Arc::new(HttpFetcher::new().unwrap());
    create_router(AppState::new(config, upstream))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .unwrap_or_else(|| panic!("missing header {name}"))
            .to_str()
            .unwrap()
    }
}

pub async fn send(app: &Router, method: &str, uri: &str) -> TestResponse {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(body_bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, "GET", uri).await
}
