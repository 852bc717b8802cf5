//! Fake scoring service
//!
//! Serves `POST /search` with a configurable behavior and records every
//! request body, so tests can assert on what the client actually sent.

use super::constants::*;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// How the fake service answers `POST /search`.
#[derive(Clone)]
pub enum Behavior {
    /// Answers 200 with (at most `top_k` of) these hits.
    Hits(Vec<Value>),
    /// Answers 200 with every one of these hits, ignoring `top_k`.
    HitsIgnoringTopK(Vec<Value>),
    /// Answers with the given status and a plain text body.
    Status(u16),
    /// Answers 200 with a body that is not JSON.
    Malformed,
    /// Sleeps before answering with an empty array.
    Slow(Duration),
}

struct ServiceState {
    behavior: Behavior,
    requests: Mutex<Vec<Value>>,
}

/// Fake scoring service bound to a random local port.
///
/// When dropped, the server gracefully shuts down.
pub struct TestScoringServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    state: Arc<ServiceState>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

async fn health() -> &'static str {
    "ok"
}

async fn search(State(state): State<Arc<ServiceState>>, Json(body): Json<Value>) -> Response {
    let top_k = body["top_k"].as_u64().unwrap_or(0) as usize;
    state.requests.lock().unwrap().push(body);

    match &state.behavior {
        Behavior::Hits(hits) => {
            Json(hits.iter().take(top_k).cloned().collect::<Vec<_>>()).into_response()
        }
        Behavior::HitsIgnoringTopK(hits) => Json(hits.clone()).into_response(),
        Behavior::Status(code) => {
            let status = StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, "scoring failed").into_response()
        }
        Behavior::Malformed => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            "<html>definitely not json</html>",
        )
            .into_response(),
        Behavior::Slow(delay) => {
            tokio::time::sleep(*delay).await;
            Json(Vec::<Value>::new()).into_response()
        }
    }
}

impl TestScoringServer {
    /// Spawns a new fake service on a random port and waits until it answers.
    ///
    /// # Panics
    ///
    /// Panics if the port cannot be bound or the server never becomes ready.
    pub async fn spawn(behavior: Behavior) -> Self {
        let state = Arc::new(ServiceState {
            behavior,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/health", get(health))
            .route("/search", post(search))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

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
            base_url: format!("http://127.0.0.1:{}", port),
            state,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Bodies of every `POST /search` received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
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

/// Base URL of a local port nobody listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let port = listener
        .local_addr()
        .expect("Failed to get local address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
