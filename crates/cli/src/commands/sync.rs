//! `codebrain sync`: Detect the stack and refresh vendor specs.

use chrono::Utc;
use codebrain_vendor::SpecRegistry;

pub async fn run(stale_only: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let layout = super::layout();
    if !layout.context_path().exists() {
        return Err("No brain found here. Run `codebrain init` first.".into());
    }

    let mut registry = SpecRegistry::with_templates(layout).await?;
    let now = Utc::now();

    let detected = registry.detect_project(&config.vendor.manifest_dir).await?;
    if !detected.is_empty() {
        println!("🔍 Detected: {}", detected.join(", "));
    }

    println!("🔄 Syncing vendor specifications...\n");
    let report = if stale_only {
        registry.sync_stale(now, config.staleness_threshold()).await?
    } else {
        registry.sync_all(now).await?
    };

    for key in &report.succeeded {
        let name = registry.source(key).map_or(key.as_str(), |s| s.name.as_str());
        println!("  ✓ {name} spec updated");
    }
    for failure in &report.failed {
        println!("  ✗ Failed to sync {}: {}", failure.key, failure.error);
    }

    println!("\n📊 Sync Summary:");
    println!("  ✓ Success: {}", report.succeeded.len());
    println!("  ✗ Failed:  {}", report.failed.len());

    if !report.is_clean() {
        return Err(format!("{} vendor spec(s) failed to sync", report.failed.len()).into());
    }
    Ok(())
}
