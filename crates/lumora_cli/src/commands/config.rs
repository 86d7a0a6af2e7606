use std::path::Path;

use lumora_core::config::{self, LumoraConfig};
use miette::{IntoDiagnostic, Result};
use owo_colors::OwoColorize;

use crate::output::Output;

/// Show current configuration
pub async fn show(config: &LumoraConfig) -> Result<()> {
    let output = Output::new();

    output.section("Current Configuration");
    output.kv(
        "Data directory",
        &config.storage.resolve_data_dir().display().to_string(),
    );
    println!();

    let toml_str = toml::to_string_pretty(config).into_diagnostic()?;
    println!("{}", toml_str);

    Ok(())
}

/// Save current configuration to file
pub async fn save(config: &LumoraConfig, path: &Path) -> Result<()> {
    let output = Output::new();

    output.info(
        "💾",
        &format!("Saving configuration to: {}", path.display()),
    );

    config::save_config(config, path).await?;

    output.success("Configuration saved successfully!");
    println!();
    println!("To use this configuration, run:");
    println!("  {} --config {}", "lumora".bright_green(), path.display());

    Ok(())
}
