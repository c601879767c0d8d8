//! Shared CLI helpers — response printing, version banner, history files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use sonora_core::types::{ChatResult, ConversationMessage};
use sonora_providers::registry;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Print a chat reply to stdout.
pub fn print_response(result: &ChatResult) {
    println!();
    println!(
        "{} {}",
        "🎵 Sonora".cyan().bold(),
        format!("({}/{})", result.provider, result.model).dimmed()
    );
    if result.reply_text.is_empty() {
        println!("{}", "(empty response)".dimmed());
    } else {
        println!("{}", result.reply_text);
    }
    println!();
}

/// `provider/model`, plus the catalog display name when the model is listed.
///
/// Unlisted models are still sent as-is; the catalog is informational.
pub fn describe_model(provider: &str, model: &str) -> String {
    let display_name = registry::lookup(provider)
        .and_then(|desc| desc.find_model(model))
        .map(|info| info.name);

    match display_name {
        Some(name) => format!("{provider}/{model} ({name})"),
        None => format!("{provider}/{model}"),
    }
}

/// Print the banner shown at startup.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "🎵 Sonora".cyan().bold(), version.dimmed());
    println!();
}

/// Print a "thinking" placeholder while the upstream call is in flight.
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

/// Read a conversation history file (JSON array of `{role, content}`).
pub fn read_history(path: &Path) -> Result<Vec<ConversationMessage>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read history file: {}", path.display()))?;
    let history = serde_json::from_str(&content)
        .with_context(|| format!("invalid history file: {}", path.display()))?;
    Ok(history)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
