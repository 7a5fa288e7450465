//! Routing definitions for the todo API.

use axum::Router;
use axum::routing::{get, patch};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_todo, delete_todo, health_check, toggle_done, update_todo,
};
use super::query::list_todos;

/// Creates the API router with all routes and middleware.
///
/// # Routes
///
/// - `GET /health`
/// - `GET /api/todos`, `POST /api/todos`, `DELETE /api/todos?id=<uuid>`
/// - `PATCH /api/todos/{id}` (toggle), `PUT /api/todos/{id}` (content)
/// - `PATCH|POST /api/todos/{id}/toggle`
///
/// # Examples
///
/// ```ignore
/// let router = create_router(state);
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/todos",
            get(list_todos).post(create_todo).delete(delete_todo),
        )
        .route("/todos/{id}", patch(toggle_done).put(update_todo))
        .route("/todos/{id}/toggle", patch(toggle_done).post(toggle_done));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

/// Creates the CORS layer configuration.
///
/// The browser UI is served from a different origin during development.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
