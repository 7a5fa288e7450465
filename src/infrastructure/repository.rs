//! Todo repository.
//!
//! The repository owns pagination and per-ID mutation on top of a
//! [`TodoStore`]. Every mutation is a full read-modify-write of the stored
//! collection.

use std::sync::Arc;

use thiserror::Error;

use super::store::{StoreError, TodoStore};
use crate::domain::{Timestamp, Todo, TodoId, TodoPatch};

/// Page size used when the caller does not provide one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Input was missing or invalid.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No todo has the requested identifier.
    #[error("Todo not found: {0}")]
    NotFound(String),

    /// The record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// =============================================================================
// Pagination
// =============================================================================

/// Pagination parameters for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub limit: u32,
}

impl Pagination {
    /// Creates new pagination parameters.
    ///
    /// # Panics
    ///
    /// Panics if `page == 0` or `limit == 0`. Runtime input goes through
    /// [`Pagination::or_defaults`], which never panics.
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        assert!(page > 0, "page must be greater than 0");
        assert!(limit > 0, "limit must be greater than 0");
        Self { page, limit }
    }

    /// Creates pagination from optional values, falling back to page 1 and
    /// `default_limit` for absent or zero values.
    #[must_use]
    pub fn or_defaults(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        Self {
            page: page.filter(|page| *page > 0).unwrap_or(1),
            limit: limit
                .filter(|limit| *limit > 0)
                .unwrap_or_else(|| default_limit.max(1)),
        }
    }

    /// Returns the index of the first item of the page window.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64).saturating_sub(1) * self.limit as u64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated result containing the page window and totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedResult<T> {
    /// The items in the current page window.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    /// Current page (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub limit: u32,
}

impl<T> PaginatedResult<T> {
    /// Creates a new paginated result.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        Self {
            items,
            total,
            page,
            limit,
        }
    }

    /// Returns the total number of pages, `ceil(total / limit)`.
    #[must_use]
    pub const fn pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit as u64)
    }

    /// Returns true if there is a page after the current one.
    #[must_use]
    pub const fn has_more_pages(&self) -> bool {
        (self.page as u64) < self.pages()
    }
}

/// Cuts the page window out of `items`.
///
/// This is a pure function.
#[must_use]
pub fn paginate<T>(items: Vec<T>, pagination: Pagination) -> PaginatedResult<T> {
    let total = items.len() as u64;
    let window = usize::try_from(pagination.offset())
        .map(|offset| {
            items
                .into_iter()
                .skip(offset)
                .take(pagination.limit as usize)
                .collect()
        })
        .unwrap_or_default();

    PaginatedResult::new(window, total, pagination.page, pagination.limit)
}

// =============================================================================
// Todo Repository
// =============================================================================

/// Repository for todos on top of an injected record store.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use todo_feed::infrastructure::{InMemoryTodoStore, Pagination, TodoRepository};
///
/// let repository = TodoRepository::new(Arc::new(InMemoryTodoStore::new()));
/// let todo = repository.create("Write the report").await?;
/// let page = repository.get(Pagination::default()).await?;
/// ```
#[derive(Clone)]
pub struct TodoRepository {
    store: Arc<dyn TodoStore + Send + Sync>,
}

impl std::fmt::Debug for TodoRepository {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("TodoRepository").finish_non_exhaustive()
    }
}

impl TodoRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn TodoStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Creates a todo with the given content.
    ///
    /// The new todo gets a fresh identifier, the current timestamp and
    /// `done = false`, and is appended to the stored collection.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::Validation` if `content` is empty or only whitespace.
    /// - `RepositoryError::Store` if the store fails.
    pub async fn create(&self, content: &str) -> Result<Todo, RepositoryError> {
        let content = validate_content(content)?;
        let todo = Todo::new(TodoId::generate(), content, Timestamp::now());

        let mut todos = self.store.load_all().await?;
        todos.push(todo.clone());
        self.store.save_all(todos).await?;

        tracing::debug!(todo_id = %todo.id, "Todo created");
        Ok(todo)
    }

    /// Returns the page window selected by `pagination` in storage order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store fails.
    pub async fn get(
        &self,
        pagination: Pagination,
    ) -> Result<PaginatedResult<Todo>, RepositoryError> {
        let todos = self.store.load_all().await?;
        Ok(paginate(todos, pagination))
    }

    /// Flips the completion flag of the todo with the given identifier.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::NotFound` if no todo has that identifier.
    /// - `RepositoryError::Store` if the store fails.
    pub async fn toggle_done(&self, id: &TodoId) -> Result<Todo, RepositoryError> {
        self.modify(id, Todo::toggled).await
    }

    /// Applies `patch` to the todo with the given identifier.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::Validation` if the patch carries empty content.
    /// - `RepositoryError::NotFound` if no todo has that identifier.
    /// - `RepositoryError::Store` if the store fails.
    pub async fn update(&self, id: &TodoId, patch: TodoPatch) -> Result<Todo, RepositoryError> {
        let content = patch.content.as_deref().map(validate_content).transpose()?;
        let patch = TodoPatch {
            content,
            done: patch.done,
        };
        self.modify(id, |todo| todo.apply(patch)).await
    }

    /// Replaces the content of the todo with the given identifier.
    ///
    /// # Errors
    ///
    /// See [`TodoRepository::update`].
    pub async fn update_content_by_id(
        &self,
        id: &TodoId,
        content: &str,
    ) -> Result<Todo, RepositoryError> {
        self.update(id, TodoPatch::content(content)).await
    }

    /// Removes the todo with the given identifier.
    ///
    /// Deletion is idempotent: an absent identifier is not an error. Returns
    /// whether a todo was removed. The store is only rewritten when the
    /// collection changed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store fails.
    pub async fn delete_by_id(&self, id: &TodoId) -> Result<bool, RepositoryError> {
        let todos = self.store.load_all().await?;
        let before = todos.len();
        let remaining: Vec<Todo> = todos.into_iter().filter(|todo| &todo.id != id).collect();

        if remaining.len() == before {
            tracing::debug!(todo_id = %id, "Delete of absent todo ignored");
            return Ok(false);
        }

        self.store.save_all(remaining).await?;
        tracing::debug!(todo_id = %id, "Todo deleted");
        Ok(true)
    }

    /// Loads the collection, rewrites the todo with the given identifier
    /// using `transform` and saves the collection.
    async fn modify<F>(&self, id: &TodoId, transform: F) -> Result<Todo, RepositoryError>
    where
        F: FnOnce(Todo) -> Todo,
    {
        let mut todos = self.store.load_all().await?;
        let slot = todos
            .iter_mut()
            .find(|todo| &todo.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        let updated = transform(slot.clone());
        *slot = updated.clone();

        self.store.save_all(todos).await?;
        tracing::debug!(todo_id = %id, done = updated.done, "Todo updated");
        Ok(updated)
    }
}

/// Rejects empty content.
fn validate_content(content: &str) -> Result<String, RepositoryError> {
    if content.trim().is_empty() {
        return Err(RepositoryError::Validation(
            "content must not be empty".to_string(),
        ));
    }
    Ok(content.to_string())
}

// =============================================================================
// Tests
// =============================================================================
