//! Command implementations

mod activate;
mod cache;
mod fetch;
mod init;
mod install;
mod status;
mod version;

pub use activate::activate;
pub use cache::cache;
pub use fetch::fetch;
pub use init::init;
pub use install::install;
pub use status::status;
pub use version::version;

use crate::config::Config;
use crate::fetch::HttpFetcher;
use crate::router::{Phase, Router};
use crate::store::DiskStore;
use std::path::Path;
use std::sync::Arc;

/// Build a disk-backed router for one command invocation
///
/// Every command is a separate process, so the adapter resumes the router
/// at the phase the command implies instead of replaying the lifecycle.
fn build_router(config: &Config, partitions_dir: &Path, phase: Phase) -> Router {
    let store = Arc::new(DiskStore::new(partitions_dir.to_path_buf()));
    let fetcher = Arc::new(HttpFetcher::new(config.network.timeout_secs));
    Router::resume(config.clone(), store, fetcher, phase)
}
