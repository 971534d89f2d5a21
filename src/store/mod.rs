//! Cache partition storage
//!
//! Partitions are named, versioned key-value stores mapping a request URL
//! to a stored response. The router never holds a partition handle across
//! operations; every read and write addresses a partition by name.
//!
//! # Lifecycle
//!
//! | Operation | When |
//! |-----------|------|
//! | put | successful (2xx) retrieval on a cacheable route |
//! | get | every request matching a cached route |
//! | delete_partition | activation sweep of stale generations |

pub mod disk;
pub mod memory;

pub use disk::DiskStore;
pub use memory::MemoryStore;

use crate::error::AirlockResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format bytes as human-readable size (e.g., "1.5 GB")
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// A response as stored in (or retrieved for) a cache partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, in arrival order
    pub headers: Vec<(String, String)>,
    /// Response body bytes
    pub body: Vec<u8>,
}

impl CachedResponse {
    /// Create a response with no headers
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: vec![],
            body,
        }
    }

    /// Whether the status is in the success range
    ///
    /// Only successful responses are ever written to a partition; failed
    /// or error responses are never cached.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value matching the given name, case-insensitive
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Summary of a stored entry, for inspection and display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySummary {
    /// Request URL the entry is keyed by
    pub url: String,
    /// Stored status code
    pub status: u16,
    /// Body size in bytes
    pub body_len: u64,
    /// When the entry was written
    pub stored_at: DateTime<Utc>,
}

/// Abstract partition store interface
///
/// Implementations must be safe under concurrent access: per-entry put,
/// get, and delete are atomic, and two concurrent writers for the same
/// URL resolve last-writer-wins.
#[async_trait]
pub trait PartitionStore: Send + Sync {
    /// Look up a stored response by URL within one partition
    async fn get(&self, partition: &str, url: &str) -> AirlockResult<Option<CachedResponse>>;

    /// Store a response under the given URL, overwriting any prior entry
    async fn put(&self, partition: &str, url: &str, response: &CachedResponse)
        -> AirlockResult<()>;

    /// Names of all partitions that currently exist
    async fn partitions(&self) -> AirlockResult<Vec<String>>;

    /// Delete a partition and every entry it owns
    async fn delete_partition(&self, partition: &str) -> AirlockResult<()>;

    /// Summaries of all entries in one partition
    async fn entries(&self, partition: &str) -> AirlockResult<Vec<EntrySummary>>;
}
