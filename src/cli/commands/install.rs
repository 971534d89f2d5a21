//! Install command - prefetch both manifests into the static partition

use crate::cli::commands::build_router;
use crate::config::Config;
use crate::error::AirlockResult;
use crate::router::Phase;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Run the install lifecycle step against the disk store
pub async fn install(config: &Config, partitions_dir: &Path) -> AirlockResult<()> {
    let router = build_router(config, partitions_dir, Phase::Installing);

    let shell_count = config.manifest.shell.len();
    let model_count = config.manifest.models.len();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!(
        "Prefetching {} shell assets and {} models from {}",
        shell_count, model_count, config.manifest.origin
    ));

    let result = router.install().await;
    spinner.finish_and_clear();
    result?;

    println!(
        "{} Installed generation {} ({} entries in {})",
        style("✓").green(),
        style(router.version()).bold(),
        shell_count + model_count,
        config.cache.static_partition()
    );
    println!("Run {} to sweep prior generations.", style("airlock activate").cyan());
    Ok(())
}
