//! Offline request router
//!
//! The router owns no global state: it is constructed from a [`Config`]
//! plus an injected partition store and fetcher, and exposes the lifecycle
//! operations (`install`, `activate`), per-request routing
//! (`handle_fetch`), and the side channels (messages, push, sync) as
//! plain async methods. Binding those to an actual host is the adapter's
//! job.

pub mod lifecycle;
pub mod message;
pub mod rules;

pub use lifecycle::{Lifecycle, Phase};
pub use message::{ClickOutcome, Message, Notification, PushPayload, VersionReply};
pub use rules::{classify, RouteClass, Strategy};

use crate::config::Config;
use crate::error::{AirlockError, AirlockResult};
use crate::fetch::{Fetcher, Request};
use crate::store::{CachedResponse, PartitionStore};
use futures_util::future::try_join_all;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use ::http::{Method, Uri};

/// Sync tag recognized by the background replay hook
pub const SYNC_TAG: &str = "background-sync";

/// Which side served a routed response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    /// Live network response
    Network,
    /// Stored response from a cache partition
    Cache,
}

/// A response produced by the router, tagged with its source
#[derive(Debug, Clone)]
pub struct RouterResponse {
    pub response: CachedResponse,
    pub source: ResponseSource,
}

impl RouterResponse {
    fn network(response: CachedResponse) -> Self {
        Self {
            response,
            source: ResponseSource::Network,
        }
    }

    fn cached(response: CachedResponse) -> Self {
        Self {
            response,
            source: ResponseSource::Cache,
        }
    }
}

/// The offline request router
pub struct Router {
    config: Config,
    store: Arc<dyn PartitionStore>,
    fetcher: Arc<dyn Fetcher>,
    lifecycle: Mutex<Lifecycle>,
}

impl Router {
    /// Create a router for a fresh registration (phase `Installing`)
    pub fn new(config: Config, store: Arc<dyn PartitionStore>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self::resume(config, store, fetcher, Phase::Installing)
    }

    /// Create a router resumed at a known lifecycle phase
    pub fn resume(
        config: Config,
        store: Arc<dyn PartitionStore>,
        fetcher: Arc<dyn Fetcher>,
        phase: Phase,
    ) -> Self {
        Self {
            config,
            store,
            fetcher,
            lifecycle: Mutex::new(Lifecycle::resume(phase)),
        }
    }

    /// The current version marker, e.g. `airlock-v3`
    pub fn version(&self) -> String {
        self.config.cache.version_marker()
    }

    /// Current lifecycle phase
    pub async fn phase(&self) -> Phase {
        self.lifecycle.lock().await.phase()
    }

    /// Whether immediate activation has been requested
    pub async fn skip_waiting_requested(&self) -> bool {
        self.lifecycle.lock().await.skip_waiting_requested()
    }

    /// Populate the static partition from both manifests
    ///
    /// The shell and model manifests are retrieved concurrently; install
    /// readiness is the logical AND of both. Nothing is written unless
    /// every retrieval succeeded, so a failed install leaves no partial
    /// shell cache. On success the router requests skip-waiting and
    /// enters `Waiting`.
    pub async fn install(&self) -> AirlockResult<()> {
        let partition = self.config.cache.static_partition();

        let shell = self.fetch_manifest(self.config.manifest.shell_urls());
        let models = self.fetch_manifest(self.config.manifest.model_urls());
        let (shell_entries, model_entries) = tokio::try_join!(shell, models)?;

        let total = shell_entries.len() + model_entries.len();
        for (url, response) in shell_entries.into_iter().chain(model_entries) {
            // Store failures during install are fatal: the readiness gate
            // is all-or-nothing.
            self.store.put(&partition, &url, &response).await?;
        }

        let mut lifecycle = self.lifecycle.lock().await;
        lifecycle.installed()?;
        lifecycle.request_skip_waiting();

        info!(partition, entries = total, "install complete");
        Ok(())
    }

    async fn fetch_manifest(&self, urls: Vec<String>) -> AirlockResult<Vec<(String, CachedResponse)>> {
        try_join_all(urls.into_iter().map(|url| async move {
            let uri: Uri = url
                .parse()
                .map_err(|_| AirlockError::UrlInvalid(url.clone()))?;
            let response =
                self.fetcher
                    .fetch(&uri)
                    .await
                    .map_err(|e| AirlockError::InstallFailed {
                        url: url.clone(),
                        reason: e.to_string(),
                    })?;
            if !response.is_success() {
                return Err(AirlockError::InstallFailed {
                    url: url.clone(),
                    reason: format!("status {}", response.status),
                });
            }
            Ok((url, response))
        }))
        .await
    }

    /// Sweep stale partitions and take control of clients
    ///
    /// Deletes every partition whose name is not among the current
    /// generation's three, concurrently, then claims clients. Returns the
    /// swept partition names.
    pub async fn activate(&self) -> AirlockResult<Vec<String>> {
        self.lifecycle.lock().await.begin_activation()?;

        let keep = self.config.cache.live_partitions();
        let existing = self.store.partitions().await?;
        let stale: Vec<String> = existing
            .into_iter()
            .filter(|name| !keep.contains(name))
            .collect();

        try_join_all(stale.iter().map(|name| {
            debug!(partition = %name, "deleting stale partition");
            self.store.delete_partition(name)
        }))
        .await?;

        self.lifecycle.lock().await.activated()?;

        info!(
            generation = %self.version(),
            swept = stale.len(),
            "activation complete"
        );
        Ok(stale)
    }

    /// Route one intercepted request
    ///
    /// Returns `Ok(None)` for non-GET methods: those pass through to the
    /// network untouched, with no interception and no caching.
    pub async fn handle_fetch(&self, request: &Request) -> AirlockResult<Option<RouterResponse>> {
        if request.method != Method::GET {
            debug!(method = %request.method, url = %request.url(), "non-GET, passing through");
            return Ok(None);
        }

        let class = rules::classify(&self.config.routes, &request.uri);
        let partition = class.partition(&self.config.cache);
        let url = request.url();
        debug!(%url, class = %class, partition, "routing request");

        let routed = match class.strategy() {
            Strategy::NetworkFirst => self.network_first(&partition, &url, &request.uri).await?,
            Strategy::CacheFirst => self.cache_first(&partition, &url, &request.uri).await?,
        };
        Ok(Some(routed))
    }

    async fn network_first(
        &self,
        partition: &str,
        url: &str,
        uri: &Uri,
    ) -> AirlockResult<RouterResponse> {
        match self.fetcher.fetch(uri).await {
            Ok(response) => {
                self.store_if_success(partition, url, &response).await;
                Ok(RouterResponse::network(response))
            }
            Err(err) => {
                debug!(%url, error = %err, "network failed, trying cache");
                match self.lookup(partition, url).await {
                    Some(cached) => Ok(RouterResponse::cached(cached)),
                    None => Err(err),
                }
            }
        }
    }

    async fn cache_first(
        &self,
        partition: &str,
        url: &str,
        uri: &Uri,
    ) -> AirlockResult<RouterResponse> {
        if let Some(cached) = self.lookup(partition, url).await {
            return Ok(RouterResponse::cached(cached));
        }

        match self.fetcher.fetch(uri).await {
            Ok(response) => {
                self.store_if_success(partition, url, &response).await;
                Ok(RouterResponse::network(response))
            }
            Err(err) => {
                debug!(%url, error = %err, "cache miss and network failed");
                Err(err)
            }
        }
    }

    /// Cache lookup; a read failure counts as a miss
    async fn lookup(&self, partition: &str, url: &str) -> Option<CachedResponse> {
        match self.store.get(partition, url).await {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%url, error = %err, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Best-effort write: only 2xx responses are stored, and a write
    /// failure never blocks returning the live response
    async fn store_if_success(&self, partition: &str, url: &str, response: &CachedResponse) {
        if !response.is_success() {
            return;
        }
        if let Err(err) = self.store.put(partition, url, response).await {
            warn!(%url, error = %err, "cache write failed");
        }
    }

    /// Handle a client message; only `GET_VERSION` produces a reply
    pub async fn on_message(&self, message: Message) -> Option<VersionReply> {
        match message {
            Message::SkipWaiting => {
                self.lifecycle.lock().await.request_skip_waiting();
                None
            }
            Message::GetVersion => Some(VersionReply {
                version: self.version(),
            }),
        }
    }

    /// Render a push payload into a notification
    pub fn on_push(&self, raw: &[u8]) -> Notification {
        Notification::render(PushPayload::parse(raw), &self.config.notifications)
    }

    /// Resolve a notification action click
    pub fn on_notification_click(&self, action: &str) -> ClickOutcome {
        if action == message::ACTION_EXPLORE {
            ClickOutcome::OpenRoot
        } else {
            ClickOutcome::Dismiss
        }
    }

    /// Background replay hook
    ///
    /// Extension point: deferred work queued while offline would be
    /// replayed here once connectivity returns. Currently a logged no-op
    /// for the recognized tag; unknown tags are ignored.
    pub async fn on_sync(&self, tag: &str) -> AirlockResult<()> {
        if tag != SYNC_TAG {
            debug!(tag, "ignoring unknown sync tag");
            return Ok(());
        }
        info!("background sync triggered");
        Ok(())
    }
}
