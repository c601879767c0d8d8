//! Utility helpers — data paths and secret masking.

use std::path::PathBuf;

/// Get the Sonora data directory (e.g. `~/.sonora/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".sonora")
}

/// Get the default file used by the file-backed config store.
pub fn get_default_store_path() -> PathBuf {
    get_data_path().join("user_configs.json")
}

/// Mask a secret for display, keeping only the last four characters.
///
/// Short secrets are fully masked. Unicode-safe.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 8 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

/// Helper to get home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}
