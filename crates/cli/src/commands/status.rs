//! `codebrain status`: Show brain status.

use chrono::Utc;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let brain = super::open_brain().await?;
    let now = Utc::now();
    let status = brain.status(now);
    let context = brain.context();

    println!("🧠 codebrain Status");
    println!("===================");
    println!("  Root:          {}", brain.layout().root().display());
    println!("  Project:       {}", context.project.name);
    println!("  Phase:         {}", context.project.phase);
    println!(
        "  Last active:   {}",
        status
            .last_active
            .map(|at| super::start::time_since(now, at))
            .unwrap_or_else(|| "never".into())
    );
    println!(
        "  Working on:    {}",
        status.current_focus.as_deref().unwrap_or("Nothing specific")
    );
    println!("  Open TODOs:    {}", status.open_tasks);
    println!("  Changes today: {}", status.changes_today);
    println!("  Patterns:      {} categories", status.pattern_categories);

    if brain.layout().config_path().exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!(
            "\n  ⚠️  No config file at {}, using defaults",
            brain.layout().config_path().display()
        );
    }

    Ok(())
}
