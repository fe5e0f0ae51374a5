//! Session prompt assembly.
//!
//! The prompt a user pastes into a fresh assistant session so it picks up
//! where the last one left off.

use codebrain_core::context::ContextDocument;
use codebrain_core::task::{Priority, Task};
use std::path::Path;

/// Open TODOs listed in the prompt.
const PROMPT_TODOS: usize = 3;

pub fn session_prompt<'a>(
    context: &ContextDocument,
    open_tasks: impl IntoIterator<Item = &'a Task>,
    root: &Path,
) -> String {
    let stack: Vec<String> = context
        .decided_stack()
        .into_iter()
        .map(|(category, choice)| format!("- {category}: {choice}"))
        .collect();
    let stack = if stack.is_empty() {
        "- Not yet defined".to_string()
    } else {
        stack.join("\n")
    };

    let todos: Vec<String> = open_tasks
        .into_iter()
        .filter(|t| !t.completed)
        .take(PROMPT_TODOS)
        .map(|t| {
            let marker = if t.priority == Priority::High { " [HIGH PRIORITY]" } else { "" };
            format!("- {}{marker}", t.text)
        })
        .collect();
    let todos = if todos.is_empty() {
        "- No specific todos".to_string()
    } else {
        todos.join("\n")
    };

    let root = root.display();
    format!(
        "I'm using codebrain to maintain context across our sessions.

Current Context:
- Project: {project}
- Phase: {phase}
- Working on: {focus}
- Brain Version: {version}

Tech Stack:
{stack}

Top TODOs:
{todos}

Please:
1. Read the full context from {root}/memory/context.yaml
2. Check {root}/memory/changelog.md for recent changes
3. Review {root}/patterns/ for learned patterns
4. Load relevant vendor specs from {root}/vendor-specs/

Let's continue where we left off. What would you like to work on?",
        project = context.project.name,
        phase = context.project.phase,
        focus = context.working_on().unwrap_or("Starting fresh"),
        version = context.brain_version,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn context() -> ContextDocument {
        ContextDocument::skeleton("storefront", NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn task(text: &str, completed: bool, priority: Priority) -> Task {
        Task {
            id: 0,
            text: text.into(),
            completed,
            priority,
            created: None,
        }
    }

    #[test]
    fn fresh_project_prompt() {
        let prompt = session_prompt(&context(), Vec::<Task>::new().iter(), Path::new(".claude"));
        assert!(prompt.contains("- Project: storefront"));
        assert!(prompt.contains("- Working on: Starting fresh"));
        assert!(prompt.contains("- Not yet defined"));
        assert!(prompt.contains("- No specific todos"));
        assert!(prompt.contains(".claude/memory/context.yaml"));
    }

    #[test]
    fn prompt_lists_stack_and_top_open_todos() {
        let patch = serde_yaml::from_str(
            "current_state: {working_on: checkout}\ntech_stack: {decided: {frontend: nextjs, db: postgres}}",
        )
        .unwrap();
        let ctx = context().merged(&patch).unwrap();
        let tasks = vec![
            task("done already", true, Priority::High),
            task("payments", false, Priority::High),
            task("emails", false, Priority::Normal),
            task("refunds", false, Priority::Low),
            task("reports", false, Priority::Normal),
        ];

        let prompt = session_prompt(&ctx, &tasks, Path::new(".claude"));
        assert!(prompt.contains("- Working on: checkout"));
        assert!(prompt.contains("- frontend: nextjs\n- db: postgres"));
        assert!(prompt.contains("- payments [HIGH PRIORITY]\n- emails\n- refunds"));
        assert!(!prompt.contains("done already"));
        assert!(!prompt.contains("reports"));
    }
}
