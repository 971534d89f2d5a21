//! Error types for Airlock
//!
//! All modules use `AirlockResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Airlock operations
pub type AirlockResult<T> = Result<T, AirlockError>;

/// All errors that can occur in Airlock
#[derive(Error, Debug)]
pub enum AirlockError {
    // Lifecycle errors
    #[error("Invalid lifecycle transition: {from} -> {to}")]
    LifecycleTransition { from: String, to: String },

    #[error("Install failed for {url}: {reason}")]
    InstallFailed { url: String, reason: String },

    // Network errors
    #[error("Network request failed: {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("Invalid URL: {0}")]
    UrlInvalid(String),

    // Store errors
    #[error("Cache partition not found: {0}")]
    PartitionNotFound(String),

    #[error("Failed to read cache entry for {url}: {reason}")]
    StoreRead { url: String, reason: String },

    #[error("Failed to write cache entry for {url}: {reason}")]
    StoreWrite { url: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Configuration file already exists: {0}")]
    ConfigExists(PathBuf),

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl AirlockError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a network error
    pub fn network(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a store-read error
    pub fn store_read(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StoreRead {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a store-write error
    pub fn store_write(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StoreWrite {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Check if error is recoverable by a cache fallback
    pub fn is_fallback_eligible(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Network { .. } => Some("Check connectivity, or run: airlock install"),
            Self::ConfigExists(_) => Some("Use --force to overwrite"),
            Self::PartitionNotFound(_) => Some("Run: airlock install"),
            _ => None,
        }
    }
}
