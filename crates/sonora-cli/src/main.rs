//! Sonora CLI — entry point.
//!
//! # Commands
//!
//! - `sonora serve` — run the HTTP gateway
//! - `sonora chat -p PROVIDER -m MODEL MESSAGE` — single-shot chat
//! - `sonora repl -p PROVIDER -m MODEL` — interactive chat
//! - `sonora providers [PROVIDER]` — list providers or a provider's models
//! - `sonora status` — show configuration
//! - `sonora onboard` — initialize config

mod chat_cmd;
mod gateway;
mod helpers;
mod onboard;
mod providers_cmd;
mod repl;
mod status;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use sonora_core::types::ModelSelection;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 🎵 Sonora — one chat API in front of many LLM providers
#[derive(Parser)]
#[command(name = "sonora", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway
    Serve {
        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Send a single message and print the reply
    Chat {
        #[command(flatten)]
        target: TargetArgs,

        /// JSON file with prior turns: `[{"role": "...", "content": "..."}]`
        #[arg(long)]
        history: Option<PathBuf>,

        /// Message to send
        message: String,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Chat interactively; history is kept client-side and resent each turn
    Repl {
        #[command(flatten)]
        target: TargetArgs,

        /// System prompt placed at the start of the conversation
        #[arg(short, long)]
        system: Option<String>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// List supported providers, or the models of one provider
    Providers {
        /// Provider id (e.g. "anthropic")
        provider: Option<String>,
    },

    /// Show configuration and provider endpoints
    Status,

    /// Initialize configuration
    Onboard,
}

/// Which provider/model to call and with which key.
#[derive(Args)]
struct TargetArgs {
    /// Provider id (openai, anthropic, google, mistral, cohere, groq, openrouter)
    #[arg(short, long)]
    provider: String,

    /// Model id as the provider knows it
    #[arg(short, long)]
    model: String,

    /// API key for the provider
    #[arg(short = 'k', long, env = "SONORA_API_KEY", hide_env_values = true)]
    api_key: String,
}

impl From<TargetArgs> for ModelSelection {
    fn from(args: TargetArgs) -> Self {
        ModelSelection::new(args.provider, args.model, args.api_key)
    }
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { logs } => {
            init_logging(logs, true);
            gateway::run().await
        }
        Commands::Chat {
            target,
            history,
            message,
            logs,
        } => {
            init_logging(logs, false);
            chat_cmd::run(target.into(), message, history.as_deref()).await
        }
        Commands::Repl {
            target,
            system,
            logs,
        } => {
            init_logging(logs, false);
            repl::run(target.into(), system).await
        }
        Commands::Providers { provider } => providers_cmd::run(provider.as_deref()),
        Commands::Status => status::run(),
        Commands::Onboard => onboard::run(),
    }
}

/// Initialize tracing/logging.
///
/// `--logs` wins; otherwise `RUST_LOG` is honoured when `from_env` is set,
/// falling back to warnings only.
fn init_logging(verbose: bool, from_env: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("sonora=debug,info")
    } else if from_env {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
