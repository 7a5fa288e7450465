//! Application settings and store selection.
//!
//! Settings are read from environment variables (after `.env` has been loaded
//! by the binary) and decide which record store backs the repository.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `file` (default) | `in_memory`
//! - `DB_FILE_PATH`: path of the JSON store file (default: `./db`)
//! - `DEFAULT_PAGE_SIZE`: page size when `limit` is not given (default: 10)
//! - `HOST`: server host address (default: `0.0.0.0`)
//! - `PORT`: server port (default: `3000`)
//! - `LOG_FORMAT`: `pretty` (default) | `json`
//!
//! # Example
//!
//! ```ignore
//! use todo_feed::infrastructure::AppSettings;
//!
//! let settings = AppSettings::from_env()?;
//! let store = settings.create_store();
//! ```

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::repository::DEFAULT_PAGE_SIZE;
use super::{InMemoryTodoStore, JsonFileStore, TodoStore};

// =============================================================================
// Configuration Types
// =============================================================================

/// Which record store backs the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// JSON file on disk.
    #[default]
    File,
    /// Process memory; everything is lost on exit.
    InMemory,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "file" | "json" => Ok(Self::File),
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigurationError::InvalidLogFormat(value.to_string())),
        }
    }
}

/// Runtime settings of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Record store backend.
    pub storage_mode: StorageMode,
    /// Path of the JSON store file (used when `storage_mode` is `File`).
    pub db_file_path: PathBuf,
    /// Page size used when a list request has no `limit`.
    pub default_page_size: u32,
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            db_file_path: PathBuf::from("./db"),
            default_page_size: DEFAULT_PAGE_SIZE,
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_format: LogFormat::default(),
        }
    }
}

impl AppSettings {
    /// Creates a new settings builder.
    pub fn builder() -> AppSettingsBuilder {
        AppSettingsBuilder::default()
    }

    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if any variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    ///
    /// Empty or whitespace-only values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if any variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let storage_mode = read("STORAGE_MODE")
            .map(|value| value.parse::<StorageMode>())
            .transpose()?
            .unwrap_or(defaults.storage_mode);

        let log_format = read("LOG_FORMAT")
            .map(|value| value.parse::<LogFormat>())
            .transpose()?
            .unwrap_or(defaults.log_format);

        let default_page_size = read("DEFAULT_PAGE_SIZE")
            .map(|value| parse_page_size(&value))
            .transpose()?
            .unwrap_or(defaults.default_page_size);

        let port = read("PORT")
            .map(|value| {
                value
                    .parse::<u16>()
                    .map_err(|_| ConfigurationError::InvalidPort(value))
            })
            .transpose()?
            .unwrap_or(defaults.port);

        let settings = Self {
            storage_mode,
            db_file_path: read("DB_FILE_PATH").map_or(defaults.db_file_path, PathBuf::from),
            default_page_size,
            host: read("HOST").unwrap_or(defaults.host),
            port,
            log_format,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the page size is zero or the server
    /// address does not parse.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.default_page_size == 0 {
            return Err(ConfigurationError::InvalidPageSize("0".to_string()));
        }
        self.socket_address()?;
        Ok(())
    }

    /// Returns the address the server binds to.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidAddress` if `host:port` does not parse.
    pub fn socket_address(&self) -> Result<SocketAddr, ConfigurationError> {
        let address = format!("{}:{}", self.host, self.port);
        address
            .parse()
            .map_err(|_| ConfigurationError::InvalidAddress(address))
    }

    /// Creates the record store selected by `storage_mode`.
    #[must_use]
    pub fn create_store(&self) -> Arc<dyn TodoStore + Send + Sync> {
        match self.storage_mode {
            StorageMode::File => Arc::new(JsonFileStore::new(self.db_file_path.clone())),
            StorageMode::InMemory => Arc::new(InMemoryTodoStore::new()),
        }
    }
}

fn parse_page_size(value: &str) -> Result<u32, ConfigurationError> {
    value
        .parse::<u32>()
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| ConfigurationError::InvalidPageSize(value.to_string()))
}

/// Builder for `AppSettings`.
///
/// # Example
///
/// ```ignore
/// let settings = AppSettings::builder()
///     .storage_mode(StorageMode::InMemory)
///     .port(8080)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppSettingsBuilder {
    settings: Option<AppSettings>,
}

impl AppSettingsBuilder {
    fn settings(&mut self) -> &mut AppSettings {
        self.settings.get_or_insert_with(AppSettings::default)
    }

    /// Sets the storage mode.
    #[must_use]
    pub fn storage_mode(mut self, mode: StorageMode) -> Self {
        self.settings().storage_mode = mode;
        self
    }

    /// Sets the store file path.
    #[must_use]
    pub fn db_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings().db_file_path = path.into();
        self
    }

    /// Sets the default page size.
    #[must_use]
    pub fn default_page_size(mut self, size: u32) -> Self {
        self.settings().default_page_size = size;
        self
    }

    /// Sets the server host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.settings().host = host.into();
        self
    }

    /// Sets the server port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.settings().port = port;
        self
    }

    /// Sets the log format.
    #[must_use]
    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.settings().log_format = format;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the settings are invalid.
    pub fn build(self) -> Result<AppSettings, ConfigurationError> {
        let settings = self.settings.unwrap_or_default();
        settings.validate()?;
        Ok(settings)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while reading settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Invalid storage mode value.
    #[error("Invalid storage mode: '{0}'. Expected 'file' or 'in_memory'")]
    InvalidStorageMode(String),

    /// Invalid log format value.
    #[error("Invalid log format: '{0}'. Expected 'pretty' or 'json'")]
    InvalidLogFormat(String),

    /// Page size is not a positive integer.
    #[error("Invalid default page size: '{0}'. Expected a positive integer")]
    InvalidPageSize(String),

    /// Port is not a valid port number.
    #[error("Invalid port: '{0}'")]
    InvalidPort(String),

    /// Host and port do not form a socket address.
    #[error("Invalid server address: '{0}'")]
    InvalidAddress(String),
}

// =============================================================================
// Tests
// =============================================================================
