//! Subcommand implementations. Each command opens what it needs, does one
//! thing, and prints the result.

pub mod checkpoint;
pub mod config_cmd;
pub mod context;
pub mod decide;
pub mod init;
pub mod learn;
pub mod solution;
pub mod start;
pub mod status;
pub mod sync;
pub mod todo;

use chrono::Utc;
use codebrain_config::{BrainConfig, BrainLayout};
use codebrain_memory::Brain;

pub(crate) fn layout() -> BrainLayout {
    BrainLayout::new(BrainConfig::root_dir())
}

pub(crate) fn load_config() -> Result<BrainConfig, Box<dyn std::error::Error>> {
    Ok(BrainConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Open the brain for the current project, with a hint when there is none.
pub(crate) async fn open_brain() -> Result<Brain, Box<dyn std::error::Error>> {
    let config = load_config()?;
    let layout = layout();
    tracing::debug!(root = %layout.root().display(), "Opening brain");
    match Brain::open(layout, config, Utc::now()).await {
        Ok(brain) => Ok(brain),
        Err(codebrain_core::Error::Store(e)) if e.is_missing() => {
            Err("No brain found here. Run `codebrain init` first.".into())
        }
        Err(e) => Err(e.into()),
    }
}
