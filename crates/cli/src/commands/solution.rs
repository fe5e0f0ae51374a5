//! `codebrain remember` / `codebrain recall`: Solution memory.

use chrono::Utc;

pub async fn remember(problem: &str, solution: &str) -> Result<(), Box<dyn std::error::Error>> {
    let brain = super::open_brain().await?;
    let key = brain.remember_solution(problem, solution, Utc::now()).await?;

    println!("💡 Remembered as '{key}'");
    Ok(())
}

pub async fn recall(problem: &str) -> Result<(), Box<dyn std::error::Error>> {
    let brain = super::open_brain().await?;
    let matches = brain.find_similar_solutions(problem).await?;

    if matches.is_empty() {
        println!("🔍 No similar solutions found for: \"{problem}\"");
        return Ok(());
    }

    println!("🔍 {} similar solution(s):", matches.len());
    println!();
    for (i, m) in matches.iter().enumerate() {
        println!(
            "  {}. [{:.0}%] {}",
            i + 1,
            m.similarity * 100.0,
            m.record.problem
        );
        println!("     → {}", m.record.solution);
    }

    // The best match counts as a reuse.
    if let Some(best) = matches.first() {
        brain.mark_solution_used(&best.key).await?;
    }
    Ok(())
}
