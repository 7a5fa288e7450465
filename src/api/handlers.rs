//! HTTP handlers for todo mutations and health checks.
//!
//! Handlers validate their input first, then call the repository and map its
//! outcome onto a status code:
//!
//! | Outcome                  | Status |
//! |--------------------------|--------|
//! | created                  | 201    |
//! | updated / toggled        | 200    |
//! | deleted                  | 204    |
//! | invalid input            | 400    |
//! | unknown id               | 404    |
//! | store failure            | 500    |

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use uuid::Uuid;

use super::dto::{CreateTodoRequest, DeleteTodoQuery, TodoEnvelope, UpdateTodoRequest};
use super::error::ApiErrorResponse;
use crate::domain::TodoId;
use crate::infrastructure::{DEFAULT_PAGE_SIZE, TodoRepository};

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration for runtime settings.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Page size used when a list request has no `limit`.
    pub default_page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Todo repository.
    pub repository: TodoRepository,
    /// Application configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Creates a new `AppState` with the default configuration.
    #[must_use]
    pub fn new(repository: TodoRepository) -> Self {
        Self {
            repository,
            config: AppConfig::default(),
        }
    }

    /// Creates a new `AppState` with a custom configuration.
    #[must_use]
    pub const fn with_config(repository: TodoRepository, config: AppConfig) -> Self {
        Self { repository, config }
    }
}

// =============================================================================
// POST /api/todos Handler
// =============================================================================

/// Creates a new todo.
///
/// # Request Body
///
/// ```json
/// { "content": "Buy milk" }
/// ```
///
/// # Response
///
/// - **201 Created**: `{ "todo": { ... } }`
/// - **400 Bad Request**: body missing, not JSON, `content` not a string, or
///   `content` empty
/// - **500 Internal Server Error**: store failure
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for the 400 and 500 cases above.
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoEnvelope>), ApiErrorResponse> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "Create body rejected");
        ApiErrorResponse::bad_request("You need to provide a content to create a TODO")
            .with_description(rejection.body_text())
    })?;

    let todo = state.repository.create(&request.content).await?;

    Ok((StatusCode::CREATED, Json(TodoEnvelope::from(todo))))
}

// =============================================================================
// PATCH /api/todos/{id}/toggle Handler
// =============================================================================

/// Flips the completion flag of a todo.
///
/// Mounted on `PATCH /api/todos/{id}` and `PATCH|POST /api/todos/{id}/toggle`.
///
/// # Response
///
/// - **200 OK**: `{ "todo": { ... } }`
/// - **400 Bad Request**: blank id
/// - **404 Not Found**: no todo with that id
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for the 400, 404 and 500 cases.
pub async fn toggle_done(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TodoEnvelope>, ApiErrorResponse> {
    let id = validate_path_id(&id)?;
    let todo = state.repository.toggle_done(&id).await?;
    Ok(Json(TodoEnvelope::from(todo)))
}

// =============================================================================
// PUT /api/todos/{id} Handler
// =============================================================================

/// Replaces the content of a todo.
///
/// # Response
///
/// - **200 OK**: `{ "todo": { ... } }`
/// - **400 Bad Request**: blank id, invalid body or empty content
/// - **404 Not Found**: no todo with that id
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for the 400, 404 and 500 cases.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<TodoEnvelope>, ApiErrorResponse> {
    let id = validate_path_id(&id)?;
    let Json(request) = payload.map_err(|rejection| {
        ApiErrorResponse::bad_request("You need to provide a content to update a TODO")
            .with_description(rejection.body_text())
    })?;

    let todo = state
        .repository
        .update_content_by_id(&id, &request.content)
        .await?;

    Ok(Json(TodoEnvelope::from(todo)))
}

// =============================================================================
// DELETE /api/todos Handler
// =============================================================================

/// Deletes a todo identified by the `id` query parameter.
///
/// # Response
///
/// - **204 No Content**: deleted
/// - **400 Bad Request**: `id` missing or not a UUID
/// - **404 Not Found**: no todo with that id
/// - **500 Internal Server Error**: store failure
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for the 400, 404 and 500 cases.
pub async fn delete_todo(
    State(state): State<AppState>,
    Query(query): Query<DeleteTodoQuery>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id = query
        .id
        .as_deref()
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
        .map(TodoId::from)
        .ok_or_else(|| ApiErrorResponse::bad_request("You must to provide a valid id"))?;

    if state.repository.delete_by_id(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiErrorResponse::not_found(format!(
            "Todo with id '{id}' not found"
        )))
    }
}

/// Rejects blank path identifiers.
fn validate_path_id(raw: &str) -> Result<TodoId, ApiErrorResponse> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiErrorResponse::bad_request(
            "You must to provide a string ID",
        ));
    }
    Ok(TodoId::new(trimmed))
}

// =============================================================================
// GET /health Handler
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check endpoint.
///
/// # Response
///
/// - **200 OK**: `{ "status": "healthy", "version": "0.1.0" }`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// Tests
// =============================================================================
