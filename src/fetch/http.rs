//! HTTP fetcher backed by a blocking ureq agent
//!
//! ureq calls run on the blocking thread pool via `spawn_blocking` so
//! fetch handling stays an async suspension point for the router.

use crate::error::{AirlockError, AirlockResult};
use crate::fetch::Fetcher;
use crate::store::CachedResponse;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use ureq::Agent;

use ::http::Uri;

/// Largest body `read_to_vec` will accept; model assets can be large.
const MAX_BODY_BYTES: u64 = 512 * 1024 * 1024;

/// Network fetcher using a shared ureq agent
pub struct HttpFetcher {
    agent: Agent,
}

impl HttpFetcher {
    /// Create a fetcher with the given global timeout
    ///
    /// Non-2xx statuses are configured to come back as responses rather
    /// than errors; the router decides what is cacheable.
    pub fn new(timeout_secs: u64) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .user_agent(concat!("airlock/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent: config.new_agent(),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, uri: &Uri) -> AirlockResult<CachedResponse> {
        let agent = self.agent.clone();
        let url = uri.to_string();
        let url_for_error = url.clone();

        debug!(%url, "network fetch");

        let result = tokio::task::spawn_blocking(move || -> Result<CachedResponse, ureq::Error> {
            let mut response = agent.get(url.as_str()).call()?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();
            let body = response
                .body_mut()
                .with_config()
                .limit(MAX_BODY_BYTES)
                .read_to_vec()?;

            Ok(CachedResponse {
                status,
                headers,
                body,
            })
        })
        .await
        .map_err(|e| AirlockError::Internal(format!("fetch task panicked: {e}")))?;

        result.map_err(|e| AirlockError::network(url_for_error, e.to_string()))
    }
}
