//! Integration tests for the conversion endpoint.

mod helpers;

use axum::http::StatusCode;
use convhub_converter::FlagValue;

use helpers::{EngineMode, TestApp};

#[tokio::test]
async fn test_convert_streams_output() {
    let app = TestApp::new().await;

    let response = app
        .upload(
            "/api/convert/to/pdf/from/markdown/standalone",
            "file",
            "notes.md",
            b"# Notes",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "converted:# Notes");
    assert_eq!(response.header("content-type"), Some("application/pdf"));
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"notes.md.pdf\"")
    );

    let requests = app.engine.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.to, "pdf");
    assert_eq!(request.from.as_deref(), Some("markdown"));
    assert_eq!(request.flags["standalone"], FlagValue::Bool(true));
    assert!(request.template_path.is_none());
    assert_eq!(
        request.input_path.extension().and_then(|e| e.to_str()),
        Some("md")
    );
}

#[tokio::test]
async fn test_temp_files_cleaned_up() {
    let app = TestApp::new().await;

    let response = app
        .upload("/api/convert/to/html", "file", "a.md", b"a")
        .await;
    assert_eq!(response.status, StatusCode::OK);

    assert_eq!(app.leftover_files("uploads"), 0);
    assert_eq!(app.leftover_files("jobs"), 0);
}

#[tokio::test]
async fn test_convert_with_template() {
    let app = TestApp::new().await;
    let added = app
        .upload("/api/templates/docx?name=corporate", "file", "ref.docx", b"ref")
        .await;
    assert_eq!(added.status, StatusCode::CREATED);

    let response = app
        .upload(
            "/api/convert/template/corporate/to/docx",
            "file",
            "memo.md",
            b"memo",
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"memo.md.docx\"")
    );

    let requests = app.engine.requests.lock().unwrap();
    assert_eq!(
        requests[0].template_path,
        Some(app.state.catalog.template_path("docx", "corporate"))
    );
}

#[tokio::test]
async fn test_unknown_template() {
    let app = TestApp::new().await;

    let response = app
        .upload("/api/convert/to/docx/template/missing", "file", "a.md", b"a")
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "template_not_found");
    assert!(app.engine.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_command_errors() {
    let app = TestApp::new().await;

    let cases = [
        ("/api/convert/from/markdown", "missing_target_format"),
        ("/api/convert/to/nonsense", "invalid_target_format"),
        ("/api/convert/to/html/from/pdf", "invalid_source_format"),
        ("/api/convert/to/html/from", "malformed_command"),
        ("/api/convert/to/html/toc-depth", "malformed_command"),
    ];

    for (path, code) in cases {
        let response = app.upload(path, "file", "a.md", b"a").await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(response.body["error"], code, "{path}");
    }
    assert!(app.engine.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_last_target_wins() {
    let app = TestApp::new().await;

    let response = app
        .upload("/api/convert/to/html/to/latex", "file", "a.md", b"a")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"a.md.tex\"")
    );
}

#[tokio::test]
async fn test_missing_file() {
    let app = TestApp::new().await;

    let response = app
        .upload("/api/convert/to/html", "document", "a.md", b"a")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "invalid_file");
}

#[tokio::test]
async fn test_engine_failure() {
    let app = TestApp::with_engine(EngineMode::Fail).await;

    let response = app
        .upload("/api/convert/to/html", "file", "a.xyz", b"a")
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "conversion_failed");
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("Unknown input format")
    );
    assert_eq!(app.leftover_files("uploads"), 0);
    assert_eq!(app.leftover_files("jobs"), 0);
}

#[tokio::test]
async fn test_engine_timeout() {
    let app = TestApp::with_engine(EngineMode::Hang).await;

    let response = app
        .upload("/api/convert/to/html", "file", "a.md", b"a")
        .await;
    assert_eq!(response.status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(response.body["error"], "conversion_timeout");
    assert_eq!(app.leftover_files("jobs"), 0);
}
