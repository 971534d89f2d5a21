//! Network retrieval abstraction
//!
//! The router never talks to the network directly; it goes through the
//! [`Fetcher`] trait so tests can substitute scripted fakes.

pub mod http;

pub use self::http::HttpFetcher;

use crate::error::{AirlockError, AirlockResult};
use crate::store::CachedResponse;
use async_trait::async_trait;
// Leading `::` disambiguates the `http` crate from the sibling module.
use ::http::{Method, Uri};

/// An intercepted request, as seen by the router
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method; only GET is ever routed
    pub method: Method,
    /// Absolute request URI
    pub uri: Uri,
}

impl Request {
    /// Build a request from a method and URL string
    pub fn new(method: Method, url: &str) -> AirlockResult<Self> {
        let uri: Uri = url
            .parse()
            .map_err(|_| AirlockError::UrlInvalid(url.to_string()))?;
        if uri.scheme().is_none() || uri.host().is_none() {
            return Err(AirlockError::UrlInvalid(url.to_string()));
        }
        Ok(Self { method, uri })
    }

    /// Build a GET request from a URL string
    pub fn get(url: &str) -> AirlockResult<Self> {
        Self::new(Method::GET, url)
    }

    /// Full URL string used as the cache key
    pub fn url(&self) -> String {
        self.uri.to_string()
    }
}

/// Abstract network retrieval interface
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieve a resource by URI
    ///
    /// Non-success statuses are returned as responses; `Err` means the
    /// retrieval itself failed (offline, DNS, timeout).
    async fn fetch(&self, uri: &Uri) -> AirlockResult<CachedResponse>;
}
