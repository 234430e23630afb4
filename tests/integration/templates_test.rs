//! Integration tests for template management.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_add_list_delete_round_trip() {
    let app = helpers::TestApp::new().await;

    let response = app
        .upload(
            "/api/templates/docx?name=report",
            "file",
            "reference.docx",
            b"PK-fake-docx",
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Template added successfully");
    assert_eq!(response.body["template"]["name"], "report");
    assert_eq!(response.body["template"]["format"], "docx");
    assert_eq!(response.body["template"]["size"], 12);
    assert_eq!(
        response.body["template"]["path"],
        "/templates/docx/report.template"
    );
    assert!(response.body["template"]["createdAt"].is_string());

    let response = app.request("GET", "/api/templates?format=docx").await;
    assert_eq!(response.status, StatusCode::OK);
    let templates = response.body["templates"].as_array().unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["name"], "report");

    let response = app.request("DELETE", "/api/templates/docx/report").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Template deleted successfully");
    assert_eq!(response.body["template"]["name"], "report");
    assert_eq!(response.body["template"]["format"], "docx");

    let response = app.request("GET", "/api/templates?format=docx").await;
    assert_eq!(response.body["templates"].as_array().unwrap().len(), 0);

    // Not idempotent
    let response = app.request("DELETE", "/api/templates/docx/report").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "template_not_found");
}

#[tokio::test]
async fn test_name_derived_from_filename() {
    let app = helpers::TestApp::new().await;

    let response = app
        .upload("/api/templates/html", "file", "My Report.v2.html", b"<html/>")
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["template"]["name"], "My-Report-v2");
}

#[tokio::test]
async fn test_duplicate_is_rejected_and_original_kept() {
    let app = helpers::TestApp::new().await;

    let first = app
        .upload("/api/templates/html?name=base", "file", "a.html", b"first")
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .upload("/api/templates/html?name=base", "file", "b.html", b"second")
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "template_already_exists");

    let stored = std::fs::read(app.state.catalog.template_path("html", "base")).unwrap();
    assert_eq!(stored, b"first");
}

#[tokio::test]
async fn test_invalid_format() {
    let app = helpers::TestApp::new().await;

    let response = app
        .upload("/api/templates/nonsense", "file", "a.txt", b"x")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "invalid_format");
}

#[tokio::test]
async fn test_missing_file_field() {
    let app = helpers::TestApp::new().await;

    let response = app
        .upload("/api/templates/html", "attachment", "a.html", b"x")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "invalid_file");
}

#[tokio::test]
async fn test_traversal_name_is_sanitized() {
    let app = helpers::TestApp::new().await;

    let response = app
        .upload(
            "/api/templates/html?name=..%2F..%2Fescape",
            "file",
            "a.html",
            b"x",
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["template"]["name"], "------escape");
    assert!(
        app.dir
            .path()
            .join("templates/html/------escape.template")
            .is_file()
    );
    assert!(!app.dir.path().join("escape.template").exists());
}

#[tokio::test]
async fn test_delete_with_unsanitized_name_is_not_found() {
    let app = helpers::TestApp::new().await;
    std::fs::write(app.dir.path().join("templates/secret.template"), "x").unwrap();

    let response = app
        .request("DELETE", "/api/templates/html/..%2Fsecret")
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "template_not_found");
    assert!(app.dir.path().join("templates/secret.template").exists());
}

#[tokio::test]
async fn test_list_all_groups_formats() {
    let app = helpers::TestApp::new().await;
    app.upload("/api/templates/html?name=a", "file", "a.html", b"a")
        .await;
    app.upload("/api/templates/latex?name=b", "file", "b.tex", b"b")
        .await;

    let response = app.request("GET", "/api/templates").await;
    assert_eq!(response.status, StatusCode::OK);
    let mut found: Vec<(String, String)> = response.body["templates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| {
            (
                t["format"].as_str().unwrap().to_string(),
                t["name"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    found.sort();
    assert_eq!(
        found,
        vec![
            ("html".to_string(), "a".to_string()),
            ("latex".to_string(), "b".to_string())
        ]
    );
}

#[tokio::test]
async fn test_list_after_root_removed() {
    let app = helpers::TestApp::new().await;
    std::fs::remove_dir_all(app.dir.path().join("templates")).unwrap();

    let response = app.request("GET", "/api/templates").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["templates"].as_array().unwrap().len(), 0);
    assert!(app.dir.path().join("templates").is_dir());
}

#[tokio::test]
async fn test_upload_temp_file_removed() {
    let app = helpers::TestApp::new().await;
    app.upload("/api/templates/html?name=t", "file", "t.html", b"t")
        .await;
    assert_eq!(app.leftover_files("uploads"), 0);
}

#[tokio::test]
async fn test_format_extensions_share_base_namespace() {
    let app = helpers::TestApp::new().await;

    let response = app
        .upload(
            "/api/templates/markdown+smart?name=notes",
            "file",
            "notes.md",
            b"x",
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["template"]["format"], "markdown");

    let response = app
        .request("GET", "/api/templates?format=markdown%2Bsmart")
        .await;
    let templates = response.body["templates"].as_array().unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["name"], "notes");

    let response = app
        .request("DELETE", "/api/templates/markdown+smart/notes")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(
        !app.dir
            .path()
            .join("templates/markdown/notes.template")
            .exists()
    );
}
