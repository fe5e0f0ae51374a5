//! `codebrain start`: Open a session.
//!
//! Prints what the brain remembers, checks vendor specs, emits the session
//! prompt and logs a `Session started` checkpoint.

use crate::prompt::session_prompt;
use chrono::{DateTime, Local, Timelike, Utc};
use codebrain_core::task::Priority;
use codebrain_vendor::SpecRegistry;

/// Open TODOs shown on start.
const SHOWN_TODOS: usize = 5;
/// Today's changes shown on start.
const SHOWN_CHANGES: usize = 3;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut brain = super::open_brain().await?;
    let now = Utc::now();
    let status = brain.status(now);

    println!("🧠 codebrain v{}", env!("CARGO_PKG_VERSION"));
    println!("\n{}!\n", greeting(Local::now().hour()));

    let context = brain.context();
    println!("📁 Project:     {}", context.project.name);
    println!("🚀 Phase:       {}", context.project.phase);
    println!(
        "💻 Working on:  {}",
        status.current_focus.as_deref().unwrap_or("Nothing specific")
    );
    println!(
        "⏰ Last active: {}",
        status
            .last_active
            .map(|at| time_since(now, at))
            .unwrap_or_else(|| "First session".into())
    );

    println!("\n📝 Current TODOs:");
    let open: Vec<_> = brain.open_tasks().collect();
    if open.is_empty() {
        println!("  No pending todos");
    }
    for task in open.iter().take(SHOWN_TODOS) {
        let tag = match task.priority {
            Priority::High => " [HIGH]",
            Priority::Low => " [LOW]",
            Priority::Normal => "",
        };
        println!("  {}. {}{tag}", task.id, task.text);
    }
    if open.len() > SHOWN_TODOS {
        println!("  ... and {} more", open.len() - SHOWN_TODOS);
    }

    println!("\n📚 Vendor Specifications:");
    let registry = SpecRegistry::with_templates(brain.layout().clone()).await?;
    let stale = registry.staleness(now, brain.config().staleness_threshold());
    if stale.is_empty() {
        println!("  ✓ All specs up to date");
    } else {
        println!("  ⚠️  {} specs need updating", stale.len());
        println!("  Run `codebrain sync --stale-only` to update");
    }
    let stack = registry.detected_stack();
    if !stack.is_empty() {
        println!("  📦 Detected stack: {}", stack.join(", "));
    }

    println!("\n🔄 Recent Activity:");
    let today = now.date_naive();
    let todays: Vec<_> = brain
        .changelog()
        .iter()
        .filter(|e| e.recorded_at().is_some_and(|at| at.date_naive() == today))
        .collect();
    if todays.is_empty() {
        println!("  No activity today");
    } else {
        println!("  {} changes today", todays.len());
        for entry in &todays[todays.len().saturating_sub(SHOWN_CHANGES)..] {
            let time = entry
                .recorded_at()
                .map(|at| at.with_timezone(&Local).format("%H:%M:%S").to_string())
                .unwrap_or_default();
            println!(
                "  {time} - {}: {}",
                entry.field("Type").unwrap_or("change"),
                entry.field("Message").unwrap_or("No message")
            );
        }
    }

    let prompt = session_prompt(brain.context(), brain.open_tasks(), brain.layout().root());
    println!("\n═══════════════════════════════════════\n");
    println!("🎯 Ready to start coding!\n");
    println!("Copy this prompt into your assistant:\n");
    println!("{prompt}");

    brain.checkpoint(Some("Session started"), now).await?;
    Ok(())
}

fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    }
}

/// Human-readable age of `then` relative to `now`.
pub(crate) fn time_since(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let hours = (now - then).num_hours();
    if hours < 1 {
        return "Less than an hour ago".into();
    }
    if hours < 24 {
        let plural = if hours > 1 { "s" } else { "" };
        return format!("{hours} hour{plural} ago");
    }
    match hours / 24 {
        1 => "Yesterday".into(),
        days if days < 7 => format!("{days} days ago"),
        _ => then.format("%Y-%m-%d").to_string(),
    }
}
