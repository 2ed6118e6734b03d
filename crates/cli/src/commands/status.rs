//! `carecompanion status`: Show effective configuration.

use carecompanion_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("Care Companion Status");
    println!("=====================");
    println!("  Config dir:    {}", AppConfig::config_dir().display());
    println!("  Model:         {}", config.model);
    println!(
        "  API URL:       {}",
        config.api_url.as_deref().unwrap_or("https://api.anthropic.com")
    );
    println!(
        "  API key:       {}",
        if config.has_api_key() { "[REDACTED]" } else { "not set" }
    );
    println!("  Timeout:       {}s", config.request_timeout_secs);
    println!(
        "  Chat:          max_tokens={} temperature={}",
        config.chat.max_tokens, config.chat.temperature
    );
    println!("  Vision:        max_tokens={}", config.vision.max_tokens);
    println!("  Interactions:  max_tokens={}", config.interactions.max_tokens);
    println!(
        "  User:          {}",
        config.user.name.as_deref().unwrap_or("(unnamed)")
    );
    if let Some(tz) = &config.user.timezone {
        println!("  Timezone:      {tz}");
    }

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file, run `carecompanion onboard` first");
    }

    Ok(())
}
