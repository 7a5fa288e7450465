//! Domain module for the to-do list.
//!
//! This module contains the domain model and its value objects.

pub mod todo;

pub use todo::{Timestamp, Todo, TodoId, TodoPatch};
