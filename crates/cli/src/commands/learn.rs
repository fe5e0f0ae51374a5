//! `codebrain learn`: Record a code-style pattern.

use chrono::Utc;

pub async fn run(
    category: &str,
    pattern: &str,
    example: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut brain = super::open_brain().await?;
    let count = brain.learn_pattern(category, pattern, example, Utc::now()).await?;

    println!("🎨 Learned '{pattern}' under {category} ({count} in category)");
    Ok(())
}
