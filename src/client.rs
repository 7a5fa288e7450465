//! HTTP client for the todo API.
//!
//! [`TodoClient`] turns user actions into API calls and normalizes the
//! responses. Every call returns a `Result` so the caller decides how to
//! update its view on success or failure.
//!
//! # Example
//!
//! ```ignore
//! use todo_feed::client::{ClientError, TodoClient};
//!
//! let client = TodoClient::new("http://localhost:3000");
//! match client.create("Correr").await {
//!     Ok(todo) => todos.insert(0, todo),
//!     Err(ClientError::EmptyContent) => alert("You need a content to create a TODO"),
//!     Err(error) => alert(&error.to_string()),
//! }
//! ```

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::{
    ApiErrorBody, CreateTodoRequest, ListTodosResponse, TodoEnvelope, UpdateTodoRequest,
};
use crate::domain::{Todo, TodoId};

// =============================================================================
// Client Error
// =============================================================================

/// Errors returned by [`TodoClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Content was empty; no request was sent.
    #[error("You need to provide a content to create a TODO")]
    EmptyContent,

    /// The request could not be sent or the response could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error status.
    #[error("API error ({status}): {message}")]
    Api {
        /// Response status.
        status: StatusCode,
        /// Message from the error body, or the status reason.
        message: String,
    },
}

impl ClientError {
    /// Returns the response status for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::EmptyContent | Self::Http(_) => None,
        }
    }
}

// =============================================================================
// Todo Page
// =============================================================================

/// One page of todos as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoPage {
    /// Todos in the page window.
    pub todos: Vec<Todo>,
    /// Total number of todos.
    pub total: u64,
    /// Total number of pages.
    pub pages: u64,
}

impl From<ListTodosResponse> for TodoPage {
    fn from(response: ListTodosResponse) -> Self {
        Self {
            todos: response.todos,
            total: response.total,
            pages: response.pages,
        }
    }
}

// =============================================================================
// Todo Client
// =============================================================================

/// Client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    http: reqwest::Client,
    base_url: String,
}

impl TodoClient {
    /// Creates a client for the API served at `base_url`, e.g. `http://localhost:3000`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn todos_url(&self) -> String {
        format!("{}/api/todos", self.base_url)
    }

    /// Fetches a page using the server's default page size.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure and `ClientError::Api`
    /// on a non-200 answer.
    pub async fn get(&self, page: u32) -> Result<TodoPage, ClientError> {
        let response = self
            .http
            .get(self.todos_url())
            .query(&[("page", page)])
            .send()
            .await?;
        let body: ListTodosResponse = expect_status(response, StatusCode::OK).await?;
        Ok(TodoPage::from(body))
    }

    /// Fetches a page with an explicit page size.
    ///
    /// # Errors
    ///
    /// See [`TodoClient::get`].
    pub async fn get_with_limit(&self, page: u32, limit: u32) -> Result<TodoPage, ClientError> {
        let response = self
            .http
            .get(self.todos_url())
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        let body: ListTodosResponse = expect_status(response, StatusCode::OK).await?;
        Ok(TodoPage::from(body))
    }

    /// Creates a todo.
    ///
    /// Empty content is rejected locally without contacting the server.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::EmptyContent`, `ClientError::Http`, or
    /// `ClientError::Api` when the server does not answer 201.
    pub async fn create(&self, content: &str) -> Result<Todo, ClientError> {
        if content.trim().is_empty() {
            return Err(ClientError::EmptyContent);
        }

        let response = self
            .http
            .post(self.todos_url())
            .json(&CreateTodoRequest {
                content: content.to_string(),
            })
            .send()
            .await?;
        let body: TodoEnvelope = expect_status(response, StatusCode::CREATED).await?;
        Ok(body.todo)
    }

    /// Flips the completion flag of a todo and returns the server's version.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 for unknown ids.
    pub async fn toggle_done(&self, id: &TodoId) -> Result<Todo, ClientError> {
        let response = self
            .http
            .patch(format!("{}/{id}/toggle", self.todos_url()))
            .send()
            .await?;
        let body: TodoEnvelope = expect_status(response, StatusCode::OK).await?;
        Ok(body.todo)
    }

    /// Replaces the content of a todo.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::EmptyContent` for empty content and
    /// `ClientError::Api` for server-side failures.
    pub async fn update_content(&self, id: &TodoId, content: &str) -> Result<Todo, ClientError> {
        if content.trim().is_empty() {
            return Err(ClientError::EmptyContent);
        }

        let response = self
            .http
            .put(format!("{}/{id}", self.todos_url()))
            .json(&UpdateTodoRequest {
                content: content.to_string(),
            })
            .send()
            .await?;
        let body: TodoEnvelope = expect_status(response, StatusCode::OK).await?;
        Ok(body.todo)
    }

    /// Deletes a todo.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` for invalid (400) or unknown (404) ids.
    pub async fn delete_by_id(&self, id: &TodoId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.todos_url())
            .query(&[("id", id.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(());
        }
        Err(api_error(response).await)
    }
}

/// Decodes the body when the status matches, otherwise builds `ClientError::Api`.
async fn expect_status<T: DeserializeOwned>(
    response: reqwest::Response,
    expected: StatusCode,
) -> Result<T, ClientError> {
    if response.status() != expected {
        return Err(api_error(response).await);
    }
    Ok(response.json::<T>().await?)
}

async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let message = match response.json::<ApiErrorBody>().await {
        Ok(body) => body.error.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string(),
    };
    tracing::debug!(%status, %message, "API call failed");
    ClientError::Api { status, message }
}

// =============================================================================
// Search
// =============================================================================

/// Returns the todos whose content contains `search`, ignoring case.
///
/// An empty or whitespace-only search matches everything. Order is preserved.
#[must_use]
pub fn filter_todos_by_content<'a>(search: &str, todos: &'a [Todo]) -> Vec<&'a Todo> {
    let needle = search.trim().to_lowercase();
    todos
        .iter()
        .filter(|todo| needle.is_empty() || todo.content_contains(&needle))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;
    use rstest::rstest;

    fn todos() -> Vec<Todo> {
        ["Correr no parque", "Estudar Rust", "correr de novo"]
            .iter()
            .enumerate()
            .map(|(index, content)| {
                Todo::new(TodoId::new(index.to_string()), *content, Timestamp::now())
            })
            .collect()
    }

    #[rstest]
    #[case("", 3)]
    #[case("   ", 3)]
    #[case("correr", 2)]
    #[case("CORRER", 2)]
    #[case("rust", 1)]
    #[case("python", 0)]
    fn test_filter_todos_by_content(#[case] search: &str, #[case] expected: usize) {
        let todos = todos();
        assert_eq!(filter_todos_by_content(search, &todos).len(), expected);
    }

    #[rstest]
    fn test_filter_todos_by_content_preserves_order() {
        let todos = todos();
        let ids: Vec<&str> = filter_todos_by_content("correr", &todos)
            .into_iter()
            .map(|todo| todo.id.as_str())
            .collect();
        assert_eq!(ids, vec!["0", "2"]);
    }

    #[rstest]
    fn test_client_trims_trailing_slash() {
        let client = TodoClient::new("http://localhost:3000/");
        assert_eq!(client.todos_url(), "http://localhost:3000/api/todos");
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_empty_content_fails_locally() {
        // Port 9 (discard) is never contacted: validation fails first.
        let client = TodoClient::new("http://127.0.0.1:9");

        let result = client.create("").await;

        assert!(matches!(result, Err(ClientError::EmptyContent)));
    }

    #[rstest]
    fn test_client_error_status() {
        let error = ClientError::Api {
            status: StatusCode::NOT_FOUND,
            message: "missing".to_string(),
        };
        assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(ClientError::EmptyContent.status(), None);
    }
}
