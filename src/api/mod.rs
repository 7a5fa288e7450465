//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod query;
pub mod routes;

pub use dto::{
    CreateTodoRequest, DeleteTodoQuery, ListTodosQuery, ListTodosResponse, TodoEnvelope,
    UpdateTodoRequest,
};
pub use error::{ApiError, ApiErrorBody, ApiErrorResponse};
pub use handlers::{
    AppConfig, AppState, HealthResponse, create_todo, delete_todo, health_check, toggle_done,
    update_todo,
};
pub use query::{list_todos, parse_pagination};
pub use routes::create_router;
