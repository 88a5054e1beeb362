mod helpers;

use axum::http::StatusCode;
use policy_relay::config::{CachePolicy, PoliciesMode};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const ADS_BODY: &str = "google.com, pub-123, DIRECT";

async fn ads_upstream(expected_calls: u64) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app-ads.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ADS_BODY)
                .insert_header("Content-Type", "text/plain"),
        )
        .expect(expected_calls)
        .mount(&mock_server)
        .await;

    mock_server
}

#[tokio::test]
async fn test_ttl_variant_serves_second_call_from_cache() {
    let upstream = ads_upstream(1).await;
    let app = helpers::test_app(helpers::config(
        Some(format!("{}/app-ads.txt", upstream.uri())),
        None,
        PoliciesMode::Embed,
        CachePolicy::Ttl,
    ));

    let first = helpers::get(&app, "/app-ads.txt").await;
    let second = helpers::get(&app, "/app-ads.txt").await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, ADS_BODY);
    assert_eq!(first.header("content-type"), "text/plain");
    assert_eq!(first.header("cache-control"), "public, max-age=3600");
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body, ADS_BODY);
    // MockServer verifies the single upstream call on drop
}

#[tokio::test]
async fn test_bypass_variant_hits_upstream_every_time() {
    let upstream = ads_upstream(2).await;
    let app = helpers::test_app(helpers::config(
        Some(format!("{}/app-ads.txt", upstream.uri())),
        None,
        PoliciesMode::Embed,
        CachePolicy::Bypass,
    ));

    let first = helpers::get(&app, "/app-ads.txt").await;
    let second = helpers::get(&app, "/app-ads.txt").await;

    assert_eq!(first.body, ADS_BODY);
    assert_eq!(second.body, ADS_BODY);
    assert_eq!(first.header("cache-control"), "no-store");
}

#[tokio::test]
async fn test_missing_url_names_variable() {
    let app = helpers::test_app(helpers::config(
        None,
        None,
        PoliciesMode::Embed,
        CachePolicy::Ttl,
    ));

    let response = helpers::get(&app, "/app-ads.txt").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.header("content-type"), "text/plain");
    assert_eq!(
        response.body,
        "APP_ADS_URL environment variable is not configured"
    );
}

#[tokio::test]
async fn test_upstream_failure_returns_generic_plain_text() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app-ads.txt"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream secret detail"))
        .mount(&mock_server)
        .await;
    let app = helpers::test_app(helpers::config(
        Some(format!("{}/app-ads.txt", mock_server.uri())),
        None,
        PoliciesMode::Embed,
        CachePolicy::Ttl,
    ));

    let response = helpers::get(&app, "/app-ads.txt").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.header("content-type"), "text/plain");
    assert_eq!(response.body, "Failed to fetch app-ads.txt content");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let upstream = ads_upstream(1).await;
    let app = helpers::test_app(helpers::config(
        Some(format!("{}/app-ads.txt", upstream.uri())),
        None,
        PoliciesMode::Embed,
        CachePolicy::Ttl,
    ));

    let response = helpers::get(&app, "/app-ads.txt").await;

    assert!(!response.header("x-request-id").is_empty());
}
