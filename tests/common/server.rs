//! Fake job API lifecycle management
//!
//! Each test gets its own server on a random port, holding the fixture job
//! list and recording every page request it receives.

use super::constants::*;
use super::fixtures::create_test_jobs;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use jobscroll::board::{BoardConfig, JobBoard};
use jobscroll::source::{JobSourceClient, PageRequest, SourceConfig};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// How the fake API answers page requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeMode {
    /// Slice of the fixture list at `offset..offset + limit`
    Normal,
    /// HTTP 500 with a text body
    ServerError,
    /// HTTP 200 with a body that is not JSON
    Malformed,
    /// HTTP 200 with JSON lacking `jdList`
    MissingJobList,
    /// One valid record followed by one without a `jdUid`
    PartiallyInvalid,
}

struct FakeJobApi {
    jobs: Vec<Value>,
    mode: Mutex<ServeMode>,
    requests: Mutex<Vec<PageRequest>>,
}

async fn serve_page(
    State(api): State<Arc<FakeJobApi>>,
    Json(request): Json<PageRequest>,
) -> Response {
    api.requests.lock().unwrap().push(request);
    let mode = *api.mode.lock().unwrap();

    match mode {
        ServeMode::Normal => {
            let start = request.offset.min(api.jobs.len());
            let end = (request.offset + request.limit).min(api.jobs.len());
            let page = api.jobs[start..end].to_vec();
            Json(json!({
                "jdList": page,
                "totalCount": api.jobs.len(),
            }))
            .into_response()
        }
        ServeMode::ServerError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
        }
        ServeMode::Malformed => (StatusCode::OK, "<html>gateway page</html>").into_response(),
        ServeMode::MissingJobList => Json(json!({ "totalCount": api.jobs.len() })).into_response(),
        ServeMode::PartiallyInvalid => {
            let valid = api.jobs[0].clone();
            Json(json!({
                "jdList": [valid, { "companyName": "Nameless Corp" }],
                "totalCount": api.jobs.len(),
            }))
            .into_response()
        }
    }
}

/// Fake job API instance
///
/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    api: Arc<FakeJobApi>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new fake API on a random port and waits until it answers.
    ///
    /// # Panics
    ///
    /// Panics if the port cannot be bound or the server does not become
    /// ready in time.
    pub async fn spawn() -> Self {
        let api = Arc::new(FakeJobApi {
            jobs: create_test_jobs(),
            mode: Mutex::new(ServeMode::Normal),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route(JOBS_PATH, post(serve_page))
            .route("/health", get(|| async { "ok" }))
            .with_state(api.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            api,
            _shutdown_tx: Some(shutdown_tx),
        };
        server.wait_for_ready().await;
        server
    }

    /// Full URL of the job page endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, JOBS_PATH)
    }

    /// Client pointed at this server
    pub fn client(&self) -> JobSourceClient {
        JobSourceClient::new(SourceConfig {
            endpoint: self.endpoint(),
            timeout: Duration::from_secs(5),
        })
        .expect("Failed to create job source client")
    }

    /// Board reading from this server, with the test page sizes
    pub fn board(&self, config: BoardConfig) -> JobBoard {
        JobBoard::new(Arc::new(self.client()), config)
    }

    pub fn set_mode(&self, mode: ServeMode) {
        *self.api.mode.lock().unwrap() = mode;
    }

    /// Every page request received so far, in order
    pub fn requests(&self) -> Vec<PageRequest> {
        self.api.requests.lock().unwrap().clone()
    }

    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/health", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
