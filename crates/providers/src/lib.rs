//! Generation collaborators for Care Companion.
//!
//! The Anthropic provider implements both `carecompanion_core::TextGenerator`
//! and `carecompanion_core::VisionGenerator`. [`build_from_config`] wires it
//! up from the loaded configuration.

pub mod anthropic;

pub use anthropic::AnthropicProvider;

use carecompanion_config::AppConfig;
use carecompanion_core::error::GenerationFailure;

/// Build the provider from configuration.
///
/// Fails with `NotConfigured` when no API key is available.
pub fn build_from_config(config: &AppConfig) -> Result<AnthropicProvider, GenerationFailure> {
    let api_key = config
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            GenerationFailure::NotConfigured(
                "no API key; set CARECOMPANION_API_KEY or api_key in config.toml".into(),
            )
        })?;

    let provider =
        AnthropicProvider::with_timeout(api_key, &config.model, config.request_timeout_secs)?;

    Ok(match &config.api_url {
        Some(url) => provider.with_base_url(url),
        None => provider,
    })
}
