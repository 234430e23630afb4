//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use convhub_api::{AppState, build_app};
use convhub_converter::{ConversionEngine, ConversionError, EngineRequest};
use convhub_core::config::AppConfig;

const BOUNDARY: &str = "convhub-test-boundary";

/// How the fake engine behaves.
#[derive(Debug, Clone, Copy)]
pub enum EngineMode {
    /// Writes `converted:<input>` to the output path.
    Echo,
    /// Reports an engine diagnostic.
    Fail,
    /// Sleeps far past any timeout.
    Hang,
}

/// In-process stand-in for Pandoc.
#[derive(Debug)]
pub struct FakeEngine {
    mode: EngineMode,
    /// Every request the engine received.
    pub requests: Mutex<Vec<EngineRequest>>,
}

#[async_trait]
impl ConversionEngine for FakeEngine {
    fn name(&self) -> &str {
        "fake"
    }

    async fn convert(&self, request: &EngineRequest) -> Result<(), ConversionError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.mode {
            EngineMode::Echo => {
                let input = tokio::fs::read(&request.input_path).await?;
                let mut output = b"converted:".to_vec();
                output.extend_from_slice(&input);
                tokio::fs::write(&request.output_path, output).await?;
                Ok(())
            }
            EngineMode::Fail => Err(ConversionError::Failed {
                diagnostic: "pandoc: Unknown input format".to_string(),
            }),
            EngineMode::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            }
        }
    }

    async fn version(&self) -> Option<String> {
        Some("fake 1.0".to_string())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct catalog access
    pub state: AppState,
    /// The engine behind the converter
    pub engine: Arc<FakeEngine>,
    /// Keeps the storage roots alive
    pub dir: TempDir,
}

impl TestApp {
    /// Create a test application with an echoing engine
    pub async fn new() -> Self {
        Self::with_engine(EngineMode::Echo).await
    }

    /// Create a test application with the given engine behaviour
    pub async fn with_engine(mode: EngineMode) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.templates.root_dir = dir.path().join("templates");
        config.converter.temp_dir = Some(dir.path().join("tmp"));
        config.converter.timeout_seconds = 1;

        let engine = Arc::new(FakeEngine {
            mode,
            requests: Mutex::new(Vec::new()),
        });
        let state = AppState::new(config, engine.clone());
        state
            .catalog
            .initialize()
            .await
            .expect("Failed to initialize catalog");

        Self {
            router: build_app(state.clone()),
            state,
            engine,
            dir,
        }
    }

    /// Make a bodiless HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    /// POST a multipart body with one file field
    pub async fn upload(
        &self,
        path: &str,
        field: &str,
        filename: &str,
        content: &[u8],
    ) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Number of entries left in a working directory under the temp root
    pub fn leftover_files(&self, sub: &str) -> usize {
        std::fs::read_dir(self.dir.path().join("tmp").join(sub))
            .map(|rd| rd.count())
            .unwrap_or(0)
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes: bytes.to_vec(),
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Vec<u8>,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
}

impl TestResponse {
    /// A header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The body as UTF-8 text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).to_string()
    }
}
