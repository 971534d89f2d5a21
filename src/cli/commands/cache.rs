//! Cache command - inspect or wipe partitions

use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::error::AirlockResult;
use crate::store::{format_bytes, DiskStore, EntrySummary, PartitionStore};
use console::style;
use std::io::{self, Write};
use std::path::Path;

/// Execute the cache command
pub async fn cache(args: CacheArgs, partitions_dir: &Path) -> AirlockResult<()> {
    let store = DiskStore::new(partitions_dir.to_path_buf());

    match args.action {
        CacheAction::List { format } => list_entries(&store, format).await,
        CacheAction::Clear { yes } => clear_partitions(&store, yes).await,
    }
}

async fn list_entries(store: &DiskStore, format: OutputFormat) -> AirlockResult<()> {
    let partitions = store.partitions().await?;

    if partitions.is_empty() {
        println!("No cache partitions found.");
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            #[derive(serde::Serialize)]
            struct PartitionJson {
                name: String,
                entries: Vec<EntrySummary>,
            }
            let mut out = vec![];
            for name in partitions {
                out.push(PartitionJson {
                    entries: store.entries(&name).await?,
                    name,
                });
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            for name in partitions {
                let entries = store.entries(&name).await?;
                println!("{} ({} entries)", style(&name).bold(), entries.len());
                for entry in entries {
                    println!(
                        "  {:<60} {:>4} {:>10} {}",
                        entry.url,
                        entry.status,
                        format_bytes(entry.body_len),
                        entry.stored_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }
        OutputFormat::Plain => {
            for name in partitions {
                for entry in store.entries(&name).await? {
                    println!("{} {}", name, entry.url);
                }
            }
        }
    }
    Ok(())
}

async fn clear_partitions(store: &DiskStore, yes: bool) -> AirlockResult<()> {
    let partitions = store.partitions().await?;
    if partitions.is_empty() {
        println!("Nothing to clear.");
        return Ok(());
    }

    if !yes {
        print!(
            "Delete {} partition(s) and all cached responses? [y/N] ",
            partitions.len()
        );
        io::stdout()
            .flush()
            .map_err(|e| crate::error::AirlockError::io("flushing prompt", e))?;

        let mut answer = String::new();
        io::stdin()
            .read_line(&mut answer)
            .map_err(|e| crate::error::AirlockError::io("reading confirmation", e))?;
        if !matches!(answer.trim(), "y" | "Y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    for name in &partitions {
        store.delete_partition(name).await?;
        println!("{} deleted {}", style("-").dim(), name);
    }
    println!("{} Cleared {} partition(s)", style("✓").green(), partitions.len());
    Ok(())
}
