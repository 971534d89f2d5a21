//! Fetch command - route one request through the router

use crate::cli::args::FetchArgs;
use crate::cli::commands::build_router;
use crate::config::Config;
use crate::error::AirlockResult;
use crate::fetch::Request;
use crate::router::{Phase, ResponseSource};
use console::style;
use std::io::Write;
use std::path::Path;
use tokio::fs;

/// Route one GET request and emit the response body
pub async fn fetch(args: FetchArgs, config: &Config, partitions_dir: &Path) -> AirlockResult<()> {
    let router = build_router(config, partitions_dir, Phase::Activated);
    let request = Request::get(&args.url)?;

    let Some(routed) = router.handle_fetch(&request).await? else {
        // Unreachable from this command; only GET requests are built.
        return Ok(());
    };

    let source = match routed.source {
        ResponseSource::Network => style("network").cyan(),
        ResponseSource::Cache => style("cache").green(),
    };
    eprintln!(
        "{} {} via {} ({} bytes)",
        style(routed.response.status).bold(),
        args.url,
        source,
        routed.response.body.len()
    );

    if args.headers {
        for (name, value) in &routed.response.headers {
            eprintln!("{}: {}", style(name).dim(), value);
        }
    }

    match args.output {
        Some(path) => {
            fs::write(&path, &routed.response.body)
                .await
                .map_err(|e| crate::error::AirlockError::io(
                    format!("writing body to {}", path.display()),
                    e,
                ))?;
            eprintln!("{} Body written to {}", style("✓").green(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout();
            stdout
                .write_all(&routed.response.body)
                .and_then(|_| stdout.flush())
                .map_err(|e| crate::error::AirlockError::io("writing body to stdout", e))?;
        }
    }
    Ok(())
}
