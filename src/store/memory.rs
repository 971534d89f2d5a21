//! In-memory partition store
//!
//! Used by unit tests and by embedders that want a non-persistent cache.

use crate::error::AirlockResult;
use crate::store::{CachedResponse, EntrySummary, PartitionStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

struct MemoryEntry {
    response: CachedResponse,
    stored_at: DateTime<Utc>,
}

/// Partition store backed by a process-local map
#[derive(Default)]
pub struct MemoryStore {
    partitions: RwLock<HashMap<String, HashMap<String, MemoryEntry>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a partition without writing any entries
    ///
    /// The disk store grows partitions implicitly on first put; tests use
    /// this to stage stale partitions for the activation sweep.
    pub async fn create_partition(&self, partition: &str) {
        self.partitions
            .write()
            .await
            .entry(partition.to_string())
            .or_default();
    }

    /// Total number of entries in one partition
    pub async fn len(&self, partition: &str) -> usize {
        self.partitions
            .read()
            .await
            .get(partition)
            .map_or(0, HashMap::len)
    }

    /// Whether a partition has no entries (or does not exist)
    pub async fn is_empty(&self, partition: &str) -> bool {
        self.len(partition).await == 0
    }
}

#[async_trait]
impl PartitionStore for MemoryStore {
    async fn get(&self, partition: &str, url: &str) -> AirlockResult<Option<CachedResponse>> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(partition)
            .and_then(|entries| entries.get(url))
            .map(|entry| entry.response.clone()))
    }

    async fn put(
        &self,
        partition: &str,
        url: &str,
        response: &CachedResponse,
    ) -> AirlockResult<()> {
        let mut partitions = self.partitions.write().await;
        partitions.entry(partition.to_string()).or_default().insert(
            url.to_string(),
            MemoryEntry {
                response: response.clone(),
                stored_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn partitions(&self) -> AirlockResult<Vec<String>> {
        let mut names: Vec<String> = self.partitions.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn delete_partition(&self, partition: &str) -> AirlockResult<()> {
        self.partitions.write().await.remove(partition);
        Ok(())
    }

    async fn entries(&self, partition: &str) -> AirlockResult<Vec<EntrySummary>> {
        let partitions = self.partitions.read().await;
        let mut summaries: Vec<EntrySummary> = partitions
            .get(partition)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(url, entry)| EntrySummary {
                        url: url.clone(),
                        status: entry.response.status,
                        body_len: entry.response.body.len() as u64,
                        stored_at: entry.stored_at,
                    })
                    .collect()
            })
            .unwrap_or_default();
        summaries.sort_by(|a, b| a.url.cmp(&b.url));
        Ok(summaries)
    }
}
