//! `sonora onboard` — initialize configuration and data directories.
//!
//! - Creates `~/.sonora/config.json` with defaults
//! - Creates the REPL history directory

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use sonora_core::config::{load_config, save_config};
use sonora_core::utils::{get_data_path, get_default_store_path};

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "🎵 Sonora — Setup".cyan().bold());
    println!();

    setup(&get_data_path())?;

    println!();
    println!(
        "  {} to keep saved model selections across restarts, set {} to {}",
        "Tip:".bold(),
        "store.path".cyan(),
        get_default_store_path().display()
    );
    println!();
    println!(
        "{}",
        "  Setup complete! Run `sonora serve` or `sonora repl -p openai -m gpt-4o`.".green()
    );
    println!();

    Ok(())
}

/// Create the config file and directories under `data_dir`.
fn setup(data_dir: &Path) -> Result<()> {
    let config_path = data_dir.join("config.json");

    // 1. Create config if it doesn't exist
    if config_path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        let config = load_config(Some(&config_path));
        save_config(&config, Some(&config_path))
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    }

    // 2. History directory for the REPL
    let history_dir = data_dir.join("history");
    std::fs::create_dir_all(&history_dir)?;
    println!("  {} history dir at {}", "✓".green(), history_dir.display());

    Ok(())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
