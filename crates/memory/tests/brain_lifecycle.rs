//! End-to-end tests for a project brain: init, work across sessions, reopen.
//!
//! Every test runs against a fresh temp directory and re-opens the brain to
//! check that what was written is what the next session reads back.

use chrono::{DateTime, Duration, TimeZone, Utc};
use codebrain_config::{BrainConfig, BrainLayout};
use codebrain_core::journal::Decision;
use codebrain_core::task::Priority;
use codebrain_memory::Brain;
use serde_yaml::Value;

// ── Helpers ──────────────────────────────────────────────────────────────

fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap()
}

async fn fresh_brain(dir: &tempfile::TempDir) -> (BrainLayout, Brain) {
    let layout = BrainLayout::new(dir.path().join(".claude"));
    Brain::init(&layout, "storefront", false, morning()).await.unwrap();
    let brain = Brain::open(layout.clone(), BrainConfig::default(), morning())
        .await
        .unwrap();
    (layout, brain)
}

fn yaml(s: &str) -> Value {
    serde_yaml::from_str(s).unwrap()
}

// ── Sessions ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn work_survives_a_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let (layout, mut brain) = fresh_brain(&dir).await;

    brain
        .update_context(&yaml(
            "current_state: {working_on: checkout}\ntech_stack: {decided: {frontend: nextjs}}",
        ))
        .await
        .unwrap();
    let task = brain
        .add_task("wire up payments", Priority::High, morning())
        .await
        .unwrap();
    brain.complete_task(1).await.unwrap();
    brain
        .add_decision(
            &Decision {
                title: "Use Postgres".into(),
                reasoning: "relational data".into(),
                alternatives: vec!["MongoDB".into(), "SQLite".into()],
            },
            morning(),
        )
        .await
        .unwrap();
    brain.checkpoint(Some("Session started"), morning()).await.unwrap();

    let later = morning() + Duration::hours(3);
    let brain = Brain::open(layout, BrainConfig::default(), later).await.unwrap();

    assert_eq!(brain.context().project.name, "storefront");
    assert_eq!(brain.context().working_on(), Some("checkout"));
    assert_eq!(
        brain.context().decided_stack(),
        vec![("frontend".to_string(), "nextjs".to_string())]
    );

    // Two seeded tasks plus the one added; the first seeded one is done.
    let texts: Vec<_> = brain.tasks().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["Complete project setup", "Define core features", task.text.as_str()]
    );
    assert!(brain.tasks()[0].completed);
    assert_eq!(brain.tasks()[2].priority, Priority::High);

    assert_eq!(brain.decisions().len(), 1);
    assert_eq!(brain.decisions()[0].field("Decision"), Some("Use Postgres"));
    assert_eq!(
        brain.decisions()[0].field("Alternatives"),
        Some("MongoDB, SQLite")
    );

    let status = brain.status(later);
    assert_eq!(status.last_active, Some(morning()));
    assert_eq!(status.current_focus.as_deref(), Some("checkout"));
    assert_eq!(status.open_tasks, 2);
    assert_eq!(status.changes_today, 1);
}

#[tokio::test]
async fn changelog_grows_by_one_entry_per_append() {
    let dir = tempfile::tempdir().unwrap();
    let (layout, mut brain) = fresh_brain(&dir).await;
    let seeded = brain.changelog().len();

    for i in 0..5 {
        brain
            .log_change("note", &format!("step {i}"), morning() + Duration::minutes(i))
            .await
            .unwrap();
    }

    let brain = Brain::open(layout, BrainConfig::default(), morning()).await.unwrap();
    assert_eq!(brain.changelog().len(), seeded + 5);
    let messages: Vec<_> = brain.changelog()[seeded..]
        .iter()
        .filter_map(|e| e.field("Message"))
        .collect();
    assert_eq!(messages, vec!["step 0", "step 1", "step 2", "step 3", "step 4"]);
}

#[tokio::test]
async fn solutions_are_recalled_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let (layout, brain) = fresh_brain(&dir).await;

    let key = brain
        .remember_solution("How do I center a div", "use flexbox", morning())
        .await
        .unwrap();
    drop(brain);

    let brain = Brain::open(layout, BrainConfig::default(), morning()).await.unwrap();
    let matches = brain
        .find_similar_solutions("center a div with flexbox")
        .await
        .unwrap();
    assert!(!matches.is_empty());
    assert_eq!(matches[0].key, key);
    assert!(matches[0].similarity > 0.5);

    assert_eq!(brain.mark_solution_used(&key).await.unwrap(), Some(1));
}

#[tokio::test]
async fn configured_threshold_applies_to_recall() {
    let dir = tempfile::tempdir().unwrap();
    let (layout, brain) = fresh_brain(&dir).await;
    brain
        .remember_solution("tokio runtime panics on shutdown", "drop handles first", morning())
        .await
        .unwrap();

    // 3 of the 4 problem keywords.
    let brain = Brain::open(layout.clone(), BrainConfig::default(), morning())
        .await
        .unwrap();
    let matches = brain
        .find_similar_solutions("tokio runtime panics")
        .await
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert!((matches[0].similarity - 0.75).abs() < 1e-12);

    let mut strict = BrainConfig::default();
    strict.memory.similarity_threshold = 0.9;
    let brain = Brain::open(layout, strict, morning()).await.unwrap();
    assert!(brain
        .find_similar_solutions("tokio runtime panics")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn rejected_context_patch_leaves_disk_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let (layout, mut brain) = fresh_brain(&dir).await;
    let before = std::fs::read_to_string(layout.context_path()).unwrap();

    assert!(brain.update_context(&yaml("brain_meta: oops")).await.is_err());
    assert_eq!(std::fs::read_to_string(layout.context_path()).unwrap(), before);
}
