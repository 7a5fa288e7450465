//! Personal to-do list API.
//!
//! This library provides a small HTTP JSON API for creating, listing,
//! toggling, updating and deleting to-do items that are persisted to a flat
//! JSON file, together with a typed client for that API.
//!
//! - [`domain`]: the `Todo` entity and its value objects
//! - [`infrastructure`]: record stores, repository, settings
//! - [`api`]: axum handlers and router
//! - [`client`]: HTTP client and client-side search

pub mod api;
pub mod client;
pub mod domain;
pub mod infrastructure;

pub use client::filter_todos_by_content;
