//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate, so helpers used by only one test
//! file would otherwise warn in the others.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use tower::ServiceExt;

use todo_feed::api::{AppConfig, AppState, create_router};
use todo_feed::domain::{Timestamp, Todo, TodoId};
use todo_feed::infrastructure::{InMemoryTodoStore, TodoRepository, TodoStore};

// =============================================================================
// AppState Creation Helpers
// =============================================================================

/// Creates a test `AppState` backed by an empty in-memory store.
pub fn create_test_app_state() -> AppState {
    AppState::new(TodoRepository::new(Arc::new(InMemoryTodoStore::new())))
}

/// Creates a test `AppState` over the given store with a custom page size.
pub fn create_test_app_state_with(
    store: Arc<dyn TodoStore + Send + Sync>,
    default_page_size: u32,
) -> AppState {
    AppState::with_config(
        TodoRepository::new(store),
        AppConfig { default_page_size },
    )
}

/// Creates the router over an empty in-memory store.
pub fn create_test_app() -> Router {
    create_router(create_test_app_state())
}

// =============================================================================
// Fixtures
// =============================================================================

/// Builds `count` todos with UUID ids and contents `Todo 0`, `Todo 1`, ...
pub fn sample_todos(count: usize) -> Vec<Todo> {
    (0..count)
        .map(|index| Todo::new(TodoId::generate(), format!("Todo {index}"), Timestamp::now()))
        .collect()
}

/// Creates a todo through the repository held by `state`.
pub async fn create_and_save_todo(state: &AppState, content: &str) -> Todo {
    state
        .repository
        .create(content)
        .await
        .expect("Failed to create todo")
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Sends one request through `app` and returns the response.
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("Router call failed")
}

/// Builds a JSON request.
pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Builds a request without a body.
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Collects a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

// =============================================================================
// Live Server
// =============================================================================

/// Serves `state` on an ephemeral local port and returns the base URL.
///
/// The server task lives until the test runtime shuts down.
pub async fn spawn_server(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("Failed to bind test listener");
    let address = listener.local_addr().expect("Missing local address");

    tokio::spawn(async move {
        axum::serve(listener, create_router(state))
            .await
            .expect("Test server failed");
    });

    format!("http://{address}")
}
