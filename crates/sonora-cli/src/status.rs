//! `sonora status` — show configuration and provider endpoints.

use anyhow::Result;
use colored::Colorize;

use sonora_core::config::{get_config_path, load_config};
use sonora_providers::registry::PROVIDERS;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "🎵 Sonora Status".cyan().bold());
    println!();

    // Config
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found, using defaults)".red().to_string()
        }
    );

    // Gateway
    println!(
        "  {:<18} {}:{} {}",
        "Gateway:".bold(),
        config.gateway.host,
        config.gateway.port,
        format!("(timeout {}s)", config.gateway.request_timeout_secs).dimmed()
    );

    // Store
    let store = match config.store.path.as_deref() {
        Some(path) => {
            let resolved = crate::helpers::expand_tilde(path);
            let mark = if resolved.exists() {
                "✓".green().to_string()
            } else {
                "(created on first save)".dimmed().to_string()
            };
            format!("{} {}", resolved.display(), mark)
        }
        None => "in-memory".to_string(),
    };
    println!("  {:<18} {}", "Config store:".bold(), store);

    println!(
        "  {:<18} {}",
        "Identity header:".bold(),
        config.identity.user_header
    );

    // Generation parameters
    println!(
        "  {:<18} {} | {}",
        "Parameters:".bold(),
        format!("temp: {}", config.chat.temperature).dimmed(),
        format!("max_tokens: {}", config.chat.max_tokens).dimmed(),
    );

    // Providers
    println!();
    println!("  {}", "Providers:".bold());
    for desc in PROVIDERS {
        let endpoint = match config.api_base_for(desc.id) {
            Some(base) => format!("{} {}", base, "(override)".yellow()),
            None => desc.api_base.dimmed().to_string(),
        };
        println!("    {:<20} {}", desc.display_name, endpoint);
    }

    println!();
    Ok(())
}
