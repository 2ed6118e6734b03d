//! Subcommand implementations.

pub mod chat;
pub mod inspect;
pub mod onboard;
pub mod speak;
pub mod status;
pub mod vision;

use std::sync::Arc;

use carecompanion_config::AppConfig;
use carecompanion_engine::{Assistant, AssistantSettings};
use serde::de::DeserializeOwned;

/// Parse a JSON argument given inline or as the path of a file holding it.
pub(crate) fn load_json<T: DeserializeOwned>(arg: &str) -> Result<T, Box<dyn std::error::Error>> {
    let trimmed = arg.trim_start();
    let json = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        arg.to_string()
    } else {
        std::fs::read_to_string(arg).map_err(|e| format!("Failed to read {arg}: {e}"))?
    };
    serde_json::from_str(&json).map_err(|e| format!("Invalid JSON in {arg}: {e}").into())
}

/// Like [`load_json`], with a default when the argument is absent.
pub(crate) fn load_json_or_default<T: DeserializeOwned + Default>(
    arg: Option<&str>,
) -> Result<T, Box<dyn std::error::Error>> {
    arg.map(load_json::<T>).transpose().map(Option::unwrap_or_default)
}

/// Load config and wire the assistant to the configured provider.
pub(crate) fn build_assistant() -> Result<(AppConfig, Assistant), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early: give a clear error
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    CARECOMPANION_API_KEY=sk-ant-...");
        eprintln!("    ANTHROPIC_API_KEY=sk-ant-...");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let provider = Arc::new(carecompanion_providers::build_from_config(&config)?);
    tracing::debug!(model = %config.model, "Generation provider ready");
    let assistant = Assistant::new(
        provider.clone(),
        provider,
        AssistantSettings::from(&config),
    );
    Ok((config, assistant))
}
