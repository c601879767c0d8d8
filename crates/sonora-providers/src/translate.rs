//! Message translators — normalized conversation → provider-native payloads.
//!
//! Every function here is pure and total: it borrows the caller's history and
//! the new user message and returns the family's message payload. Model name,
//! credentials and generation parameters are added by the client.
//!
//! Gemini and Cohere have no slot for system messages in the shapes we send,
//! so system messages are dropped for those families.

use serde::Serialize;

use sonora_core::types::{ConversationMessage, Role};

// ─────────────────────────────────────────────
// OpenAI-compatible
// ─────────────────────────────────────────────

/// `{role, content}` as used by the OpenAI-compatible and Anthropic families.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatMessage<'a> {
    pub role: Role,
    pub content: &'a str,
}

/// History unchanged (system messages in place), new user message last.
pub fn to_openai<'a>(history: &'a [ConversationMessage], new_message: &'a str) -> Vec<ChatMessage<'a>> {
    let mut messages: Vec<ChatMessage<'a>> = history
        .iter()
        .map(|m| ChatMessage {
            role: m.role,
            content: &m.content,
        })
        .collect();
    messages.push(ChatMessage {
        role: Role::User,
        content: new_message,
    });
    messages
}

// ─────────────────────────────────────────────
// Anthropic
// ─────────────────────────────────────────────

/// Anthropic messages plus the hoisted system prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnthropicPayload<'a> {
    /// Content of the last system message in the history, if any.
    pub system: Option<&'a str>,
    pub messages: Vec<ChatMessage<'a>>,
}

/// System messages lifted out of the array; the last one wins. An empty
/// system prompt is left out entirely.
pub fn to_anthropic<'a>(history: &'a [ConversationMessage], new_message: &'a str) -> AnthropicPayload<'a> {
    let mut system = None;
    let mut messages = Vec::with_capacity(history.len() + 1);

    for msg in history {
        match msg.role {
            Role::System => system = Some(msg.content.as_str()),
            role => messages.push(ChatMessage {
                role,
                content: &msg.content,
            }),
        }
    }

    messages.push(ChatMessage {
        role: Role::User,
        content: new_message,
    });

    AnthropicPayload {
        system: system.filter(|s| !s.is_empty()),
        messages,
    }
}

// ─────────────────────────────────────────────
// Gemini
// ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeminiPart<'a> {
    pub text: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeminiContent<'a> {
    /// `"user"` or `"model"`.
    pub role: &'static str,
    pub parts: Vec<GeminiPart<'a>>,
}

/// Full Gemini request body: `{contents: [...]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeminiPayload<'a> {
    pub contents: Vec<GeminiContent<'a>>,
}

/// `assistant` → `model`, system messages dropped, new user message last.
pub fn to_gemini<'a>(history: &'a [ConversationMessage], new_message: &'a str) -> GeminiPayload<'a> {
    let mut contents: Vec<GeminiContent<'a>> = history
        .iter()
        .filter_map(|msg| {
            let role = match msg.role {
                Role::System => return None,
                Role::User => "user",
                Role::Assistant => "model",
            };
            Some(GeminiContent {
                role,
                parts: vec![GeminiPart { text: &msg.content }],
            })
        })
        .collect();

    contents.push(GeminiContent {
        role: "user",
        parts: vec![GeminiPart { text: new_message }],
    });

    GeminiPayload { contents }
}

// ─────────────────────────────────────────────
// Cohere
// ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CohereTurn<'a> {
    /// `"USER"` or `"CHATBOT"`.
    pub role: &'static str,
    pub message: &'a str,
}

/// Cohere chat payload: the new message is separate from the history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CoherePayload<'a> {
    pub message: &'a str,
    pub chat_history: Vec<CohereTurn<'a>>,
}

/// `user` → `USER`, `assistant` → `CHATBOT`, system messages dropped.
pub fn to_cohere<'a>(history: &'a [ConversationMessage], new_message: &'a str) -> CoherePayload<'a> {
    let chat_history = history
        .iter()
        .filter(|msg| msg.role != Role::System)
        .map(|msg| CohereTurn {
            role: if msg.role == Role::User { "USER" } else { "CHATBOT" },
            message: &msg.content,
        })
        .collect();

    CoherePayload {
        message: new_message,
        chat_history,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_history() -> Vec<ConversationMessage> {
        vec![
            ConversationMessage::system("Be terse"),
            ConversationMessage::user("hi"),
            ConversationMessage::assistant("hello"),
        ]
    }

    #[test]
    fn test_openai_keeps_system_in_place() {
        let history = sample_history();
        let messages = to_openai(&history, "bye");

        assert_eq!(
            serde_json::to_value(&messages).unwrap(),
            json!([
                {"role": "system", "content": "Be terse"},
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"},
                {"role": "user", "content": "bye"}
            ])
        );
    }

    #[test]
    fn test_anthropic_hoists_system() {
        let history = sample_history();
        let payload = to_anthropic(&history, "bye");

        assert_eq!(payload.system, Some("Be terse"));
        assert_eq!(
            serde_json::to_value(&payload.messages).unwrap(),
            json!([
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"},
                {"role": "user", "content": "bye"}
            ])
        );
    }

    #[test]
    fn test_anthropic_last_system_wins() {
        let history = vec![
            ConversationMessage::system("first"),
            ConversationMessage::user("hi"),
            ConversationMessage::system("second"),
        ];
        let payload = to_anthropic(&history, "bye");

        assert_eq!(payload.system, Some("second"));
        assert_eq!(payload.messages.len(), 2);
        assert!(payload.messages.iter().all(|m| m.role != Role::System));
    }

    #[test]
    fn test_anthropic_no_system() {
        let history = vec![ConversationMessage::user("hi")];
        let payload = to_anthropic(&history, "bye");
        assert_eq!(payload.system, None);
    }

    #[test]
    fn test_anthropic_empty_system_omitted() {
        let history = vec![
            ConversationMessage::system("Be terse"),
            ConversationMessage::system(""),
            ConversationMessage::user("hi"),
        ];
        let payload = to_anthropic(&history, "bye");

        assert_eq!(payload.system, None);
        assert_eq!(payload.messages.len(), 2);
    }

    #[test]
    fn test_gemini_roles() {
        let history = sample_history();
        let payload = to_gemini(&history, "bye");

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "hi"}]},
                    {"role": "model", "parts": [{"text": "hello"}]},
                    {"role": "user", "parts": [{"text": "bye"}]}
                ]
            })
        );
    }

    #[test]
    fn test_cohere_history() {
        let history = sample_history();
        let payload = to_cohere(&history, "bye");

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "message": "bye",
                "chat_history": [
                    {"role": "USER", "message": "hi"},
                    {"role": "CHATBOT", "message": "hello"}
                ]
            })
        );
    }

    #[test]
    fn test_empty_history_single_turn() {
        let history: Vec<ConversationMessage> = Vec::new();

        let openai = to_openai(&history, "hi");
        assert_eq!(openai, vec![ChatMessage { role: Role::User, content: "hi" }]);

        let anthropic = to_anthropic(&history, "hi");
        assert_eq!(anthropic.system, None);
        assert_eq!(anthropic.messages.len(), 1);

        let gemini = to_gemini(&history, "hi");
        assert_eq!(gemini.contents.len(), 1);
        assert_eq!(gemini.contents[0].role, "user");
        assert_eq!(gemini.contents[0].parts[0].text, "hi");

        let cohere = to_cohere(&history, "hi");
        assert_eq!(cohere.message, "hi");
        assert!(cohere.chat_history.is_empty());
    }

    #[test]
    fn test_history_not_modified() {
        let history = sample_history();
        let before = history.clone();
        let _ = to_openai(&history, "x");
        let _ = to_anthropic(&history, "x");
        let _ = to_gemini(&history, "x");
        let _ = to_cohere(&history, "x");
        assert_eq!(history, before);
    }

    #[test]
    fn test_system_only_history() {
        let history = vec![ConversationMessage::system("only rules")];

        assert_eq!(to_gemini(&history, "hi").contents.len(), 1);
        assert!(to_cohere(&history, "hi").chat_history.is_empty());
        assert_eq!(to_openai(&history, "hi").len(), 2);
    }
}
