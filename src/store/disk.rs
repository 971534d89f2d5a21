//! Disk-backed partition store
//!
//! Persists each partition as a directory under the state dir. Every entry
//! is a pair of files keyed by the SHA-256 hex of the request URL:
//! `{hash}.json` (metadata) and `{hash}.bin` (body bytes). The body is
//! written first and the metadata last, so an entry is visible only once
//! both halves are on disk.

use crate::error::{AirlockError, AirlockResult};
use crate::store::{CachedResponse, EntrySummary, PartitionStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// On-disk entry metadata, stored next to the body blob
#[derive(Debug, Serialize, Deserialize)]
struct EntryMeta {
    url: String,
    status: u16,
    headers: Vec<(String, String)>,
    body_len: u64,
    stored_at: DateTime<Utc>,
}

/// Partition store persisting responses under a root directory
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Create a store rooted at the given directory
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory holding one subdirectory per partition
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Content-addressed entry key for a URL
    fn entry_key(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn partition_dir(&self, partition: &str) -> PathBuf {
        self.root.join(partition)
    }

    fn meta_path(&self, partition: &str, url: &str) -> PathBuf {
        self.partition_dir(partition)
            .join(format!("{}.json", Self::entry_key(url)))
    }

    fn body_path(&self, partition: &str, url: &str) -> PathBuf {
        self.partition_dir(partition)
            .join(format!("{}.bin", Self::entry_key(url)))
    }
}

#[async_trait]
impl PartitionStore for DiskStore {
    async fn get(&self, partition: &str, url: &str) -> AirlockResult<Option<CachedResponse>> {
        let meta_path = self.meta_path(partition, url);
        if !meta_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&meta_path)
            .await
            .map_err(|e| AirlockError::store_read(url, e.to_string()))?;
        let meta: EntryMeta = serde_json::from_str(&content)
            .map_err(|e| AirlockError::store_read(url, e.to_string()))?;

        let body = fs::read(self.body_path(partition, url))
            .await
            .map_err(|e| AirlockError::store_read(url, e.to_string()))?;

        Ok(Some(CachedResponse {
            status: meta.status,
            headers: meta.headers,
            body,
        }))
    }

    async fn put(
        &self,
        partition: &str,
        url: &str,
        response: &CachedResponse,
    ) -> AirlockResult<()> {
        let dir = self.partition_dir(partition);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AirlockError::store_write(url, e.to_string()))?;

        let meta = EntryMeta {
            url: url.to_string(),
            status: response.status,
            headers: response.headers.clone(),
            body_len: response.body.len() as u64,
            stored_at: Utc::now(),
        };

        // Body first, metadata last: the metadata file is the commit marker.
        fs::write(self.body_path(partition, url), &response.body)
            .await
            .map_err(|e| AirlockError::store_write(url, e.to_string()))?;

        let content = serde_json::to_string_pretty(&meta)?;
        fs::write(self.meta_path(partition, url), content)
            .await
            .map_err(|e| AirlockError::store_write(url, e.to_string()))?;

        debug!(partition, url, bytes = meta.body_len, "stored cache entry");
        Ok(())
    }

    async fn partitions(&self) -> AirlockResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(vec![]);
        }

        let mut names = vec![];
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| AirlockError::io("reading partitions directory", e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AirlockError::io("reading partition entry", e))?
        {
            let is_dir = entry
                .file_type()
                .await
                .map_err(|e| AirlockError::io("reading partition file type", e))?
                .is_dir();
            if is_dir {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    async fn delete_partition(&self, partition: &str) -> AirlockResult<()> {
        let dir = self.partition_dir(partition);
        if dir.exists() {
            fs::remove_dir_all(&dir)
                .await
                .map_err(|e| AirlockError::io(format!("deleting partition {}", partition), e))?;
            debug!(partition, "deleted partition");
        }
        Ok(())
    }

    async fn entries(&self, partition: &str) -> AirlockResult<Vec<EntrySummary>> {
        let dir = self.partition_dir(partition);
        if !dir.exists() {
            return Ok(vec![]);
        }

        let mut summaries = vec![];
        let mut dir_entries = fs::read_dir(&dir)
            .await
            .map_err(|e| AirlockError::io(format!("reading partition {}", partition), e))?;

        while let Some(entry) = dir_entries
            .next_entry()
            .await
            .map_err(|e| AirlockError::io("reading entry", e))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                // Skip entries whose metadata fails to parse rather than
                // failing the whole listing.
                let content = fs::read_to_string(&path).await.ok();
                if let Some(content) = content {
                    if let Ok(meta) = serde_json::from_str::<EntryMeta>(&content) {
                        summaries.push(EntrySummary {
                            url: meta.url,
                            status: meta.status,
                            body_len: meta.body_len,
                            stored_at: meta.stored_at,
                        });
                    }
                }
            }
        }

        summaries.sort_by(|a, b| a.url.cmp(&b.url));
        Ok(summaries)
    }
}
