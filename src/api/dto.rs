//! Data Transfer Objects for API requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Todo;
use crate::infrastructure::PaginatedResult;

// =============================================================================
// Requests
// =============================================================================

/// Request body for creating a todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    /// Text content of the new todo.
    pub content: String,
}

/// Request body for replacing the content of a todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    /// New text content.
    pub content: String,
}

/// Query string of `GET /api/todos`.
///
/// Values are kept as raw strings so that non-numeric input can be reported
/// with a precise message instead of a generic extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTodosQuery {
    /// Page number, 1-indexed.
    pub page: Option<String>,
    /// Items per page.
    pub limit: Option<String>,
}

/// Query string of `DELETE /api/todos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteTodoQuery {
    /// Identifier of the todo to delete; must be a UUID.
    pub id: Option<String>,
}

// =============================================================================
// Responses
// =============================================================================

/// Response body carrying a single todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoEnvelope {
    /// The todo.
    pub todo: Todo,
}

impl From<Todo> for TodoEnvelope {
    fn from(todo: Todo) -> Self {
        Self { todo }
    }
}

/// Response body of `GET /api/todos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTodosResponse {
    /// Todos in the requested page window.
    pub todos: Vec<Todo>,
    /// Total number of todos.
    pub total: u64,
    /// Total number of pages.
    pub pages: u64,
}

impl From<PaginatedResult<Todo>> for ListTodosResponse {
    fn from(result: PaginatedResult<Todo>) -> Self {
        let pages = result.pages();
        Self {
            todos: result.items,
            total: result.total,
            pages,
        }
    }
}
