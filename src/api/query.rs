//! Query handlers.
//!
//! `GET /api/todos` returns a page window of the stored collection.

use axum::{
    Json,
    extract::{Query, State},
};

use super::dto::{ListTodosQuery, ListTodosResponse};
use super::error::ApiErrorResponse;
use super::handlers::AppState;
use crate::infrastructure::Pagination;

/// Lists todos with pagination.
///
/// # Query Parameters
///
/// - `page`: page number, 1-indexed (default: 1)
/// - `limit`: items per page (default: the configured page size)
///
/// Absent, empty, zero or negative values fall back to the defaults.
///
/// # Response
///
/// - **200 OK**: `{ "todos": [...], "total": 12, "pages": 2 }`
/// - **400 Bad Request**: `page` or `limit` is not a number
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] on invalid parameters or store failure.
pub async fn list_todos(
    State(state): State<AppState>,
    Query(query): Query<ListTodosQuery>,
) -> Result<Json<ListTodosResponse>, ApiErrorResponse> {
    let pagination = parse_pagination(&query, state.config.default_page_size)?;

    let result = state.repository.get(pagination).await?;

    Ok(Json(ListTodosResponse::from(result)))
}

/// Converts raw query values into [`Pagination`] (pure function).
///
/// # Errors
///
/// Returns a 400 [`ApiErrorResponse`] naming the first non-numeric parameter.
pub fn parse_pagination(
    query: &ListTodosQuery,
    default_limit: u32,
) -> Result<Pagination, ApiErrorResponse> {
    let page = parse_positive(query.page.as_deref(), "page")?;
    let limit = parse_positive(query.limit.as_deref(), "limit")?;
    Ok(Pagination::or_defaults(page, limit, default_limit))
}

/// Parses an optional numeric parameter.
///
/// Returns `Ok(None)` for absent, empty and non-positive values so that the
/// caller applies its default. Values above `u32::MAX` saturate.
fn parse_positive(raw: Option<&str>, name: &str) -> Result<Option<u32>, ApiErrorResponse> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    let (negative, digits) = raw.strip_prefix('-').map_or_else(
        || (false, raw.strip_prefix('+').unwrap_or(raw)),
        |rest| (true, rest),
    );
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ApiErrorResponse::bad_request(format!(
            "`{name}` must be a number"
        )));
    }
    if negative {
        return Ok(None);
    }

    // Only digits remain, so a parse failure is an overflow.
    let value = digits.parse::<u32>().unwrap_or(u32::MAX);
    Ok(Some(value).filter(|value| *value > 0))
}

// =============================================================================
// Tests
// =============================================================================
