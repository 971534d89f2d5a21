//! Activate command - sweep partitions from prior generations

use crate::cli::commands::build_router;
use crate::config::Config;
use crate::error::AirlockResult;
use crate::router::Phase;
use console::style;
use std::path::Path;

/// Run the activation sweep against the disk store
pub async fn activate(config: &Config, partitions_dir: &Path) -> AirlockResult<()> {
    let router = build_router(config, partitions_dir, Phase::Waiting);

    let swept = router.activate().await?;

    if swept.is_empty() {
        println!(
            "{} Generation {} active, nothing to sweep",
            style("✓").green(),
            style(router.version()).bold()
        );
    } else {
        for name in &swept {
            println!("{} deleted stale partition {}", style("-").dim(), name);
        }
        println!(
            "{} Generation {} active, swept {} partition(s)",
            style("✓").green(),
            style(router.version()).bold(),
            swept.len()
        );
    }
    Ok(())
}
