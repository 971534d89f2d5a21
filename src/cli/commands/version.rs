//! Version command - the GET_VERSION message path

use crate::cli::commands::build_router;
use crate::config::Config;
use crate::error::AirlockResult;
use crate::router::{Message, Phase};
use std::path::Path;

/// Query the router for its generation name and print the reply payload
pub async fn version(config: &Config, partitions_dir: &Path) -> AirlockResult<()> {
    let router = build_router(config, partitions_dir, Phase::Activated);

    if let Some(reply) = router.on_message(Message::GetVersion).await {
        println!("{}", serde_json::to_string(&reply)?);
    }
    Ok(())
}
