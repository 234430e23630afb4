//! Integration tests for help, health, and routing.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_root_redirects_to_help() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/").await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), Some("/api/help"));
}

#[tokio::test]
async fn test_help_is_plain_text() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/help").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .header("content-type")
            .unwrap()
            .starts_with("text/plain")
    );
    let text = response.text();
    assert!(text.contains("/api/convert/<command>"));
    assert!(text.contains("Target formats:"));
}

#[tokio::test]
async fn test_health_reports_engine() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["engine"]["name"], "fake");
    assert_eq!(response.body["engine"]["version"], "fake 1.0");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = helpers::TestApp::new().await;

    for path in ["/nope", "/api/nope", "/api/templates/html/a/b"] {
        let response = app.request("GET", path).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.body["error"], "route_not_found", "{path}");
    }
}

#[tokio::test]
async fn test_powered_by_header() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health").await;
    let powered_by = response.header("x-powered-by").unwrap();
    assert!(powered_by.starts_with("convhub@"));

    let response = app.request("GET", "/nope").await;
    assert!(response.header("x-powered-by").is_some());
}
