//! In-memory record store.
//!
//! Suitable for tests and throwaway local runs. The collection is held in an
//! `Arc<RwLock<Vec<Todo>>>`; the lock only exists to make the store `Sync`,
//! it does not serialize read-modify-write cycles of callers.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::RwLock;

use super::store::{StoreError, TodoStore};
use crate::domain::Todo;

/// In-memory implementation of `TodoStore`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl InMemoryTodoStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `todos`.
    #[must_use]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: Arc::new(RwLock::new(todos)),
        }
    }

    /// Returns a copy of the current collection.
    pub async fn snapshot(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }
}

impl TodoStore for InMemoryTodoStore {
    fn load_all(&self) -> BoxFuture<'static, Result<Vec<Todo>, StoreError>> {
        let todos = Arc::clone(&self.todos);
        Box::pin(async move { Ok(todos.read().await.clone()) })
    }

    fn save_all(&self, todos: Vec<Todo>) -> BoxFuture<'static, Result<(), StoreError>> {
        let storage = Arc::clone(&self.todos);
        Box::pin(async move {
            *storage.write().await = todos;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Timestamp, TodoId};
    use rstest::rstest;

    #[rstest]
    fn test_new_store_is_empty() {
        let store = InMemoryTodoStore::new();
        let todos = tokio_test::block_on(store.load_all()).unwrap();
        assert!(todos.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_save_all_replaces_collection() {
        let store = InMemoryTodoStore::with_todos(vec![Todo::new(
            TodoId::new("old"),
            "old",
            Timestamp::now(),
        )]);
        let replacement = vec![Todo::new(TodoId::new("new"), "new", Timestamp::now())];

        store.save_all(replacement.clone()).await.unwrap();

        assert_eq!(store.snapshot().await, replacement);
    }

    #[rstest]
    #[tokio::test]
    async fn test_clones_share_storage() {
        let store = InMemoryTodoStore::new();
        let clone = store.clone();

        clone
            .save_all(vec![Todo::new(TodoId::new("a"), "x", Timestamp::now())])
            .await
            .unwrap();

        assert_eq!(store.load_all().await.unwrap().len(), 1);
    }
}
