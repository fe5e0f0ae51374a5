//! `codebrain checkpoint`: Save context and log a checkpoint.

use chrono::Utc;

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut brain = super::open_brain().await?;
    let entry = brain.checkpoint(message.as_deref(), Utc::now()).await?;

    println!(
        "💾 Checkpoint saved at {}: {}",
        entry.timestamp,
        entry.field("Message").unwrap_or_default()
    );
    Ok(())
}
