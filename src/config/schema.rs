//! Configuration schema for Airlock
//!
//! Configuration is stored at `~/.config/airlock/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cache generation settings
    pub cache: CacheConfig,

    /// Request routing patterns
    pub routes: RoutesConfig,

    /// Install-time prefetch manifests
    pub manifest: ManifestConfig,

    /// Network settings
    pub network: NetworkConfig,

    /// Notification rendering defaults
    pub notifications: NotificationsConfig,
}

/// Cache generation configuration
///
/// Partition names carry the generation suffix; bumping `generation`
/// creates a disjoint set and orphans the previous one until the
/// activation sweep collects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Application label used in the version marker
    pub app: String,

    /// Current generation tag (e.g. "v3")
    pub generation: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            app: "airlock".to_string(),
            generation: "v3".to_string(),
        }
    }
}

impl CacheConfig {
    /// The single identifier naming the current generation
    pub fn version_marker(&self) -> String {
        format!("{}-{}", self.app, self.generation)
    }

    /// Partition holding the app shell, icons, and model assets
    pub fn static_partition(&self) -> String {
        format!("static-{}", self.generation)
    }

    /// Reserved partition; no route writes to it
    pub fn dynamic_partition(&self) -> String {
        format!("dynamic-{}", self.generation)
    }

    /// Partition holding third-party data responses
    pub fn api_partition(&self) -> String {
        format!("api-{}", self.generation)
    }

    /// The full set of partitions the activation sweep retains
    pub fn live_partitions(&self) -> [String; 3] {
        [
            self.static_partition(),
            self.dynamic_partition(),
            self.api_partition(),
        ]
    }
}

/// URL patterns assigning requests to routing classes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Path prefix for first-party API requests
    pub api_prefix: String,

    /// Host of the third-party generative-language endpoint
    pub llm_host: String,

    /// Path prefix for 3D model assets
    pub models_prefix: String,

    /// File extension of 3D model assets
    pub model_extension: String,

    /// Path prefix for app icons
    pub icons_prefix: String,

    /// File extension of vector icons
    pub icon_extension: String,

    /// Paths serving the main HTML document
    pub document_paths: Vec<String>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api/".to_string(),
            llm_host: "generativelanguage.googleapis.com".to_string(),
            models_prefix: "/models/".to_string(),
            model_extension: ".glb".to_string(),
            icons_prefix: "/pwa-icons/".to_string(),
            icon_extension: ".svg".to_string(),
            document_paths: vec!["/".to_string(), "/index.html".to_string()],
        }
    }
}

/// Install-time prefetch manifests
///
/// Both lists are populated into the static partition as a single atomic
/// readiness gate; any single failure fails the whole install.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Origin the shell and model paths are resolved against
    pub origin: String,

    /// App-shell paths (document, icons, manifest, data file)
    pub shell: Vec<String>,

    /// Large binary 3D-model paths
    pub models: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:4173".to_string(),
            shell: vec![
                "/".to_string(),
                "/index.html".to_string(),
                "/favicon.svg".to_string(),
                "/manifest.json".to_string(),
                "/pwa-icons/icon-72x72.svg".to_string(),
                "/pwa-icons/icon-96x96.svg".to_string(),
                "/pwa-icons/icon-128x128.svg".to_string(),
                "/pwa-icons/icon-144x144.svg".to_string(),
                "/pwa-icons/icon-152x152.svg".to_string(),
                "/pwa-icons/icon-192x192.svg".to_string(),
                "/pwa-icons/icon-384x384.svg".to_string(),
                "/pwa-icons/icon-512x512.svg".to_string(),
                "/industry-factory-color-icon.svg".to_string(),
                "/steeldb.csv".to_string(),
            ],
            models: vec![
                "/models/bpillar.glb".to_string(),
                "/models/roof.glb".to_string(),
                "/models/roofrails.glb".to_string(),
                "/models/structure.glb".to_string(),
            ],
        }
    }
}

impl ManifestConfig {
    fn resolve(&self, path: &str) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), path)
    }

    /// Shell paths resolved to absolute URLs
    pub fn shell_urls(&self) -> Vec<String> {
        self.shell.iter().map(|p| self.resolve(p)).collect()
    }

    /// Model paths resolved to absolute URLs
    pub fn model_urls(&self) -> Vec<String> {
        self.models.iter().map(|p| self.resolve(p)).collect()
    }
}

/// Network settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Global timeout for a single retrieval, in seconds
    pub timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Notification rendering defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Title used when the push payload carries none
    pub default_title: String,

    /// Body used when the push payload carries none
    pub default_body: String,

    /// Notification icon path
    pub icon: String,

    /// Notification badge path
    pub badge: String,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            default_title: "Airlock".to_string(),
            default_body: "New content is available offline".to_string(),
            icon: "/pwa-icons/icon-192x192.svg".to_string(),
            badge: "/pwa-icons/icon-72x72.svg".to_string(),
        }
    }
}
