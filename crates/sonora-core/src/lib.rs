//! Sonora core — conversation types, configuration, and the per-user config store.

pub mod config;
pub mod store;
pub mod types;
pub mod utils;
