//! `codebrain decide`: Record an architectural decision.

use chrono::Utc;
use codebrain_core::journal::Decision;

pub async fn run(
    title: String,
    reasoning: String,
    alternatives: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut brain = super::open_brain().await?;
    let decision = Decision {
        title,
        reasoning,
        alternatives,
    };
    let entry = brain.add_decision(&decision, Utc::now()).await?;

    println!("📌 Decision recorded at {}: {}", entry.timestamp, decision.title);
    if !decision.alternatives.is_empty() {
        println!("   Alternatives: {}", decision.alternatives.join(", "));
    }
    Ok(())
}
