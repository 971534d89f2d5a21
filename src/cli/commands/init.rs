//! Init command - write a default configuration file

use crate::cli::args::InitArgs;
use crate::config::{Config, ConfigManager};
use crate::error::{AirlockError, AirlockResult};
use console::style;
use std::path::PathBuf;

/// Write the default config, refusing to overwrite unless forced
pub async fn init(args: InitArgs, config_path: Option<PathBuf>) -> AirlockResult<()> {
    let path = config_path.unwrap_or_else(ConfigManager::default_config_path);

    if path.exists() && !args.force {
        return Err(AirlockError::ConfigExists(path));
    }

    let manager = ConfigManager::with_path(path.clone());
    manager.save(&Config::default()).await?;

    println!(
        "{} Wrote default config to {}",
        style("✓").green(),
        path.display()
    );
    println!("Edit [manifest] to point at your app's origin and asset lists.");
    Ok(())
}
