//! Interactive REPL.
//!
//! Uses `rustyline` for readline-style editing with persistent input history.
//! The conversation itself lives only in this process: every turn resends the
//! full history to the provider.

use anyhow::{Context, Result};
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use sonora_core::config::load_config;
use sonora_core::types::{ChatRequest, ConversationMessage, ModelSelection};
use sonora_core::utils::mask_secret;
use sonora_providers::ChatRouter;

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Command that clears the conversation.
const RESET_COMMAND: &str = "/reset";

/// Run the interactive REPL loop.
pub async fn run(selection: ModelSelection, system_prompt: Option<String>) -> Result<()> {
    let config = load_config(None);
    let router = ChatRouter::new(&config).context("failed to build HTTP client")?;

    helpers::print_banner();
    println!(
        "  Chatting with {} (key {})",
        helpers::describe_model(&selection.provider, &selection.model),
        mask_secret(&selection.credential)
    );
    println!("  Type a message, \"{RESET_COMMAND}\" to start over, or \"exit\" to quit.");
    println!();

    let mut editor = create_editor()?;
    let mut conversation = Conversation::new(system_prompt);

    loop {
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => break,
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_exit_command(trimmed) {
            println!("\nGoodbye! 👋");
            break;
        }

        let _ = editor.add_history_entry(&input);

        if trimmed.eq_ignore_ascii_case(RESET_COMMAND) {
            conversation.reset();
            println!("  Conversation cleared.\n");
            continue;
        }

        debug!(turns = conversation.history.len(), "sending message");
        let request = ChatRequest::new(trimmed, selection.clone())
            .with_history(conversation.history.clone());

        helpers::print_thinking();
        let result = router.chat(&request).await;
        helpers::clear_thinking();

        match result {
            Ok(result) => {
                conversation.record(trimmed, &result.reply_text);
                helpers::print_response(&result);
            }
            Err(e) => eprintln!("\n❌ Error: {e}\n"),
        }
    }

    save_history(&mut editor);
    Ok(())
}

// ─────────────────────────────────────────────
// Conversation state
// ─────────────────────────────────────────────

/// Client-side conversation: optional system prompt plus completed turns.
struct Conversation {
    system_prompt: Option<String>,
    history: Vec<ConversationMessage>,
}

impl Conversation {
    fn new(system_prompt: Option<String>) -> Self {
        let mut conversation = Self {
            system_prompt,
            history: Vec::new(),
        };
        conversation.reset();
        conversation
    }

    /// Drop all turns, keeping the system prompt.
    fn reset(&mut self) {
        self.history.clear();
        if let Some(prompt) = &self.system_prompt {
            self.history.push(ConversationMessage::system(prompt.clone()));
        }
    }

    /// Append a completed exchange. Failed calls are never recorded.
    fn record(&mut self, user: &str, reply: &str) {
        self.history.push(ConversationMessage::user(user));
        self.history.push(ConversationMessage::assistant(reply));
    }
}

// ─────────────────────────────────────────────
// Line editor
// ─────────────────────────────────────────────

fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded REPL history from {}", history_path.display());
    }

    Ok(editor)
}

fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// Path to the input history file.
fn history_path() -> std::path::PathBuf {
    sonora_core::utils::get_data_path()
        .join("history")
        .join("cli_history")
}

fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
