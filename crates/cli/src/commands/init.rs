//! `codebrain init`: First-time setup.

use chrono::Utc;
use codebrain_memory::Brain;
use codebrain_vendor::SpecRegistry;

const FALLBACK_PROJECT_NAME: &str = "my-project";

pub async fn run(name: Option<String>, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let layout = super::layout();
    let config = super::load_config()?;
    let name = name
        .filter(|n| !n.trim().is_empty())
        .or_else(current_dir_name)
        .unwrap_or_else(|| FALLBACK_PROJECT_NAME.to_string());

    println!("🧠 codebrain — Initialization");
    println!("============================\n");

    let report = Brain::init(&layout, &name, force, Utc::now()).await?;
    if report.context_written {
        println!("✅ Created context for '{name}'");
    } else {
        println!(
            "⚠️  Context already exists at {}",
            layout.context_path().display()
        );
        println!("   Re-run with --force to reset it.");
    }
    for path in &report.seeded {
        println!("✅ Created {}", path.display());
    }

    let mut registry = SpecRegistry::with_templates(layout.clone()).await?;
    let detected = registry.detect_project(&config.vendor.manifest_dir).await?;
    if detected.is_empty() {
        println!("\n📦 No known stack detected (no package.json or no matches)");
    } else {
        println!("\n📦 Detected: {}", detected.join(", "));
    }

    println!("\n📝 Next steps:");
    println!("   codebrain sync    # generate vendor specs");
    println!("   codebrain start   # begin a session");

    Ok(())
}

fn current_dir_name() -> Option<String> {
    let dir = std::env::current_dir().ok()?;
    Some(dir.file_name()?.to_string_lossy().into_owned())
}
