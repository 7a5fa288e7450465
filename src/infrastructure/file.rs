//! JSON file record store.
//!
//! The whole collection lives in a single file holding
//! `{"todos": [...]}`. Every save rewrites the file from scratch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use uuid::Uuid;

use super::store::{StoreError, TodoDocument, TodoStore};
use crate::domain::Todo;

/// Record store backed by a JSON file on disk.
///
/// Saves go through a sibling temporary file that is renamed over the target,
/// so readers never observe a half-written document.
///
/// # Example
///
/// ```ignore
/// use todo_feed::infrastructure::JsonFileStore;
///
/// let store = JsonFileStore::new("./db");
/// let todos = store.load_all().await?;
/// store.save_all(todos).await?;
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: Arc<PathBuf>,
}

impl JsonFileStore {
    /// Creates a store reading and writing `path`.
    ///
    /// The file does not need to exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncates the backing file to empty content.
    ///
    /// An empty file loads as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be written.
    pub async fn clear(&self) -> Result<(), StoreError> {
        write_atomically(&self.path, String::new()).await?;
        tracing::info!(path = %self.path.display(), "Store cleared");
        Ok(())
    }
}

impl TodoStore for JsonFileStore {
    fn load_all(&self) -> BoxFuture<'static, Result<Vec<Todo>, StoreError>> {
        let path = Arc::clone(&self.path);
        Box::pin(async move {
            let raw = match tokio::fs::read_to_string(path.as_path()).await {
                Ok(raw) => raw,
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "Store file absent, starting empty");
                    return Ok(Vec::new());
                }
                Err(error) => return Err(StoreError::from(error)),
            };

            if let Some(todos) = TodoDocument::parse(&raw) {
                return Ok(todos);
            }
            if !raw.trim().is_empty() {
                tracing::warn!(
                    path = %path.display(),
                    "Store file is malformed, treating it as empty"
                );
            }
            Ok(Vec::new())
        })
    }

    fn save_all(&self, todos: Vec<Todo>) -> BoxFuture<'static, Result<(), StoreError>> {
        let path = Arc::clone(&self.path);
        Box::pin(async move {
            let count = todos.len();
            let rendered = TodoDocument::render(todos)?;
            write_atomically(&path, rendered).await?;
            tracing::debug!(path = %path.display(), count, "Store saved");
            Ok(())
        })
    }
}

/// Writes `contents` next to `path` and renames it into place.
///
/// Each call uses its own temporary file, so overlapping saves never rename
/// each other's file away. The last rename wins.
async fn write_atomically(path: &Path, contents: String) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let temporary = temporary_path(path);

    if let Err(error) = tokio::fs::write(&temporary, contents).await {
        let _ = tokio::fs::remove_file(&temporary).await;
        return Err(error.into());
    }
    if let Err(error) = tokio::fs::rename(&temporary, path).await {
        let _ = tokio::fs::remove_file(&temporary).await;
        return Err(error.into());
    }
    Ok(())
}

/// Returns a unique sibling of `path`, e.g. `db.<uuid>.tmp`.
fn temporary_path(path: &Path) -> PathBuf {
    let mut temporary = path.as_os_str().to_owned();
    temporary.push(format!(".{}.tmp", Uuid::new_v4().simple()));
    PathBuf::from(temporary)
}

// =============================================================================
// Tests
// =============================================================================
