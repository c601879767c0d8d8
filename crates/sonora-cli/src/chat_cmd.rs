//! `sonora chat` — send one message through the router and print the reply.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use sonora_core::config::load_config;
use sonora_core::types::{ChatRequest, ModelSelection};
use sonora_providers::ChatRouter;

use crate::helpers;

/// Run a single chat call.
pub async fn run(
    selection: ModelSelection,
    message: String,
    history_file: Option<&Path>,
) -> Result<()> {
    let config = load_config(None);
    let router = ChatRouter::new(&config).context("failed to build HTTP client")?;

    let history = match history_file {
        Some(path) => helpers::read_history(path)?,
        None => Vec::new(),
    };

    info!(
        provider = %selection.provider,
        model = %selection.model,
        history = history.len(),
        "processing single message"
    );

    let request = ChatRequest::new(message, selection).with_history(history);

    helpers::print_thinking();
    let result = router.chat(&request).await;
    helpers::clear_thinking();

    let result = result.context("chat request failed")?;
    helpers::print_response(&result);
    Ok(())
}
