//! `sonora providers [PROVIDER]` — list providers, or one provider's models.

use anyhow::{bail, Result};
use colored::Colorize;

use sonora_core::config::load_config;
use sonora_providers::registry::{self, PROVIDERS};

/// Run the providers command.
pub fn run(provider: Option<&str>) -> Result<()> {
    match provider {
        Some(id) => show_provider(id),
        None => {
            list_providers();
            Ok(())
        }
    }
}

fn list_providers() {
    println!();
    println!("{}", "🎵 Supported providers".cyan().bold());
    println!();
    for desc in PROVIDERS {
        println!(
            "  {:<12} {:<22} {}",
            desc.id.bold(),
            desc.display_name,
            format!("[{}]", desc.family).dimmed()
        );
    }
    println!();
}

fn show_provider(id: &str) -> Result<()> {
    let Some(desc) = registry::lookup(id) else {
        bail!(
            "unknown provider '{}' (supported: {})",
            id,
            registry::provider_ids().join(", ")
        );
    };

    let config = load_config(None);
    let base = config.api_base_for(desc.id).unwrap_or(desc.api_base);

    println!();
    println!("{}", desc.display_name.cyan().bold());
    println!();
    println!("  {:<10} {}", "Family:".bold(), desc.family);
    println!("  {:<10} {}", "Endpoint:".bold(), desc.request_url(Some(base), "{model}"));
    println!();
    println!("  {}", "Models:".bold());
    for model in desc.models {
        println!("    {:<36} {}", model.id, model.name.dimmed());
    }
    println!();
    Ok(())
}
