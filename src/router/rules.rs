//! Request classification
//!
//! Every intercepted GET request falls into exactly one of five routing
//! classes, first match wins. The class fixes both the caching strategy
//! and the partition the response lives in.

use crate::config::schema::{CacheConfig, RoutesConfig};
use std::fmt;

use ::http::Uri;

/// Caching strategy applied to a routing class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Prefer the live network response, fall back to cache on failure
    NetworkFirst,
    /// Prefer the stored response, consult the network only on a miss
    CacheFirst,
}

/// Routing class of a request, in match order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// First-party API paths and the third-party LLM host
    Api,
    /// 3D model assets
    Model,
    /// App icons; never expected to need the network after install
    Icon,
    /// The root document and main HTML page
    Document,
    /// Everything else
    Asset,
}

impl RouteClass {
    /// Strategy this class is served with
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Api | Self::Document => Strategy::NetworkFirst,
            Self::Model | Self::Icon | Self::Asset => Strategy::CacheFirst,
        }
    }

    /// Partition this class reads from and writes to
    pub fn partition(&self, cache: &CacheConfig) -> String {
        match self {
            Self::Api => cache.api_partition(),
            _ => cache.static_partition(),
        }
    }
}

impl fmt::Display for RouteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api => write!(f, "api"),
            Self::Model => write!(f, "model"),
            Self::Icon => write!(f, "icon"),
            Self::Document => write!(f, "document"),
            Self::Asset => write!(f, "asset"),
        }
    }
}

/// Classify a request URI, first match wins
pub fn classify(rules: &RoutesConfig, uri: &Uri) -> RouteClass {
    let path = uri.path();

    if path.starts_with(&rules.api_prefix) || uri.host() == Some(rules.llm_host.as_str()) {
        RouteClass::Api
    } else if path.starts_with(&rules.models_prefix) || path.contains(&rules.model_extension) {
        RouteClass::Model
    } else if path.starts_with(&rules.icons_prefix) || path.contains(&rules.icon_extension) {
        RouteClass::Icon
    } else if rules.document_paths.iter().any(|p| p == path) {
        RouteClass::Document
    } else {
        RouteClass::Asset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RoutesConfig {
        RoutesConfig::default()
    }

    fn class(url: &str) -> RouteClass {
        classify(&rules(), &url.parse().unwrap())
    }

    #[test]
    fn api_prefix_matches_first() {
        assert_eq!(class("https://app.test/api/materials"), RouteClass::Api);
        // API prefix wins over the icon extension match.
        assert_eq!(class("https://app.test/api/icon.svg"), RouteClass::Api);
    }

    #[test]
    fn llm_host_is_api_class() {
        assert_eq!(
            class("https://generativelanguage.googleapis.com/v1beta/models/gemini:generateContent"),
            RouteClass::Api
        );
    }

    #[test]
    fn models_by_prefix_or_extension() {
        assert_eq!(class("https://app.test/models/roof.glb"), RouteClass::Model);
        assert_eq!(class("https://app.test/assets/bpillar.glb"), RouteClass::Model);
    }

    #[test]
    fn icons_by_prefix_or_extension() {
        assert_eq!(
            class("https://app.test/pwa-icons/icon-192x192.svg"),
            RouteClass::Icon
        );
        assert_eq!(class("https://app.test/favicon.svg"), RouteClass::Icon);
    }

    #[test]
    fn document_paths() {
        assert_eq!(class("https://app.test/"), RouteClass::Document);
        assert_eq!(class("https://app.test/index.html"), RouteClass::Document);
    }

    #[test]
    fn everything_else_is_asset() {
        assert_eq!(class("https://app.test/steeldb.csv"), RouteClass::Asset);
        assert_eq!(class("https://app.test/assets/main.js"), RouteClass::Asset);
    }

    #[test]
    fn strategies_per_class() {
        assert_eq!(RouteClass::Api.strategy(), Strategy::NetworkFirst);
        assert_eq!(RouteClass::Document.strategy(), Strategy::NetworkFirst);
        assert_eq!(RouteClass::Model.strategy(), Strategy::CacheFirst);
        assert_eq!(RouteClass::Icon.strategy(), Strategy::CacheFirst);
        assert_eq!(RouteClass::Asset.strategy(), Strategy::CacheFirst);
    }

    #[test]
    fn partitions_per_class() {
        let cache = CacheConfig::default();
        assert_eq!(RouteClass::Api.partition(&cache), "api-v3");
        assert_eq!(RouteClass::Model.partition(&cache), "static-v3");
        assert_eq!(RouteClass::Document.partition(&cache), "static-v3");
    }

    #[test]
    fn query_string_does_not_affect_class() {
        assert_eq!(class("https://app.test/api/materials?grade=dp600"), RouteClass::Api);
        assert_eq!(class("https://app.test/?utm=1"), RouteClass::Document);
    }
}
