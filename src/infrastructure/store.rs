//! Record store abstraction.
//!
//! A record store loads the whole todo collection into memory and writes the
//! whole collection back on every mutation. There are no incremental writes
//! and no indexes.
//!
//! Stores do no locking. Callers must not issue concurrent mutations: two
//! overlapping read-modify-write cycles silently lose one of the updates.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Todo;

// =============================================================================
// Store Error
// =============================================================================

/// Errors that can occur while reading or writing the record store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The underlying storage could not be read or written.
    #[error("Storage I/O error: {0}")]
    Io(String),

    /// The collection could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

// =============================================================================
// Stored Document
// =============================================================================

/// The persisted document: a JSON object with a single `todos` key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoDocument {
    /// Every stored todo, in storage order.
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl TodoDocument {
    /// Parses a stored document.
    ///
    /// Empty input, invalid JSON, and documents without a `todos` array all
    /// yield `None`; callers treat that as an empty collection.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Vec<Todo>> {
        if raw.trim().is_empty() {
            return None;
        }
        serde_json::from_str::<Self>(raw)
            .ok()
            .map(|document| document.todos)
    }

    /// Renders the document with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if a todo cannot be serialized.
    pub fn render(todos: Vec<Todo>) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&Self { todos })?)
    }
}

// =============================================================================
// Todo Store
// =============================================================================

/// Storage backend for the todo collection.
///
/// Both methods return boxed futures so that the store can be used as a trait
/// object behind `Arc<dyn TodoStore>`.
pub trait TodoStore: Send + Sync {
    /// Loads the entire collection.
    ///
    /// Returns an empty collection when the storage is absent or its content
    /// is malformed. Only genuine I/O failures are reported as errors.
    fn load_all(&self) -> BoxFuture<'static, Result<Vec<Todo>, StoreError>>;

    /// Replaces the entire collection with `todos`.
    fn save_all(&self, todos: Vec<Todo>) -> BoxFuture<'static, Result<(), StoreError>>;
}

// =============================================================================
// Tests
// =============================================================================
