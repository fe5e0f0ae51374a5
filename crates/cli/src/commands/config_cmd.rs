//! `codebrain config`: Configuration commands.

use codebrain_config::BrainConfig;

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let path = super::layout().config_path();

    println!("# {}", path.display());
    if !path.exists() {
        println!("# (file not found, showing defaults)");
    }
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", super::layout().config_path().display());
    println!("Root: {} (override with CODEBRAIN_ROOT)", BrainConfig::root_dir().display());
    Ok(())
}
