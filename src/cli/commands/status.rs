//! Status command - show generation and partition state

use crate::cli::args::{OutputFormat, StatusArgs};
use crate::config::Config;
use crate::error::AirlockResult;
use crate::store::{format_bytes, DiskStore, PartitionStore};
use console::style;
use std::path::Path;

/// Print the current generation and each partition's contents
pub async fn status(args: StatusArgs, config: &Config, partitions_dir: &Path) -> AirlockResult<()> {
    let store = DiskStore::new(partitions_dir.to_path_buf());
    let live = config.cache.live_partitions();
    let existing = store.partitions().await?;

    #[derive(serde::Serialize)]
    struct PartitionStatus {
        name: String,
        live: bool,
        entries: usize,
        bytes: u64,
    }

    let mut rows = vec![];
    for name in &existing {
        let entries = store.entries(name).await?;
        rows.push(PartitionStatus {
            name: name.clone(),
            live: live.contains(name),
            entries: entries.len(),
            bytes: entries.iter().map(|e| e.body_len).sum(),
        });
    }

    match args.format {
        OutputFormat::Json => {
            #[derive(serde::Serialize)]
            struct Status {
                version: String,
                partitions: Vec<PartitionStatus>,
            }
            let status = Status {
                version: config.cache.version_marker(),
                partitions: rows,
            };
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Table => {
            println!("Generation: {}", style(config.cache.version_marker()).bold());
            println!("Store:      {}", partitions_dir.display());
            println!();

            if rows.is_empty() {
                println!("No partitions on disk. Run: airlock install");
                return Ok(());
            }

            println!("{:<20} {:<8} {:>8} {:>10}", "PARTITION", "STATE", "ENTRIES", "SIZE");
            println!("{}", "-".repeat(50));
            for row in &rows {
                let state = if row.live {
                    style("live").green().to_string()
                } else {
                    style("stale").yellow().to_string()
                };
                println!(
                    "{:<20} {:<8} {:>8} {:>10}",
                    row.name,
                    state,
                    row.entries,
                    format_bytes(row.bytes)
                );
            }

            if rows.iter().any(|r| !r.live) {
                println!();
                println!("Stale partitions present. Run: airlock activate");
            }
        }
        OutputFormat::Plain => {
            println!("{}", config.cache.version_marker());
            for row in &rows {
                println!(
                    "{} {} {} {}",
                    row.name,
                    if row.live { "live" } else { "stale" },
                    row.entries,
                    row.bytes
                );
            }
        }
    }
    Ok(())
}
