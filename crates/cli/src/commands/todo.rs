//! `codebrain todo`: Manage the project checklist.

use chrono::Utc;
use codebrain_core::task::Priority;

pub async fn add(text: &str, priority: &str) -> Result<(), Box<dyn std::error::Error>> {
    let priority: Priority = priority.parse()?;
    let mut brain = super::open_brain().await?;
    let task = brain.add_task(text, priority, Utc::now()).await?;

    println!("✅ Added TODO #{}: {} [{}]", task.id, task.text, task.priority);
    Ok(())
}

pub async fn done(id: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut brain = super::open_brain().await?;
    if brain.complete_task(id).await? {
        println!("✅ Completed TODO #{id}");
    } else {
        println!("   TODO #{id} was already done");
    }
    Ok(())
}

pub async fn list(all: bool) -> Result<(), Box<dyn std::error::Error>> {
    let brain = super::open_brain().await?;
    let tasks: Vec<_> = brain
        .tasks()
        .iter()
        .filter(|t| all || !t.completed)
        .collect();

    if tasks.is_empty() {
        println!("📋 No TODOs.");
        println!();
        println!("   Add one with:");
        println!("   codebrain todo add \"write tests\" --priority high");
        return Ok(());
    }

    println!("📋 TODOs ({}):", tasks.len());
    println!("{:-<60}", "");
    for task in tasks {
        let checkbox = if task.completed { "[x]" } else { "[ ]" };
        let priority = match task.priority {
            Priority::Normal => String::new(),
            other => format!("  ({other})"),
        };
        println!("  {:>3}. {checkbox} {}{priority}", task.id, task.text);
    }
    Ok(())
}
