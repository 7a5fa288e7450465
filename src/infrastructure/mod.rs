//! Infrastructure module.
//!
//! This module contains the record stores, the repository built on top of
//! them, and runtime settings.

pub mod config;
pub mod file;
pub mod in_memory;
pub mod repository;
pub mod store;

pub use config::{AppSettings, AppSettingsBuilder, ConfigurationError, LogFormat, StorageMode};
pub use file::JsonFileStore;
pub use in_memory::InMemoryTodoStore;
pub use repository::{
    DEFAULT_PAGE_SIZE, PaginatedResult, Pagination, RepositoryError, TodoRepository, paginate,
};
pub use store::{StoreError, TodoDocument, TodoStore};
