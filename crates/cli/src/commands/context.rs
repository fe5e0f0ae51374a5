//! `codebrain context`: Inspect or patch the context document.

use codebrain_core::context::patch_from_path;
use serde_yaml::Value;

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let brain = super::open_brain().await?;
    print!("{}", serde_yaml::to_string(brain.context())?);
    Ok(())
}

pub async fn set(key: &str, raw: &str) -> Result<(), Box<dyn std::error::Error>> {
    let value = parse_value(raw);
    let patch = patch_from_path(key, value)
        .ok_or_else(|| format!("Invalid key '{key}': expected dotted path like current_state.working_on"))?;

    let mut brain = super::open_brain().await?;
    brain.update_context(&patch).await?;

    println!("✅ {key} = {}", raw.trim());
    Ok(())
}

/// YAML scalars keep their type; anything that does not parse is a string.
fn parse_value(raw: &str) -> Value {
    match serde_yaml::from_str::<Value>(raw) {
        Ok(Value::Null) | Err(_) => Value::String(raw.to_string()),
        Ok(value) => value,
    }
}
