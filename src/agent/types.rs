// Agent types

use serde::{Deserialize, Serialize};

/// Role of a chat message in the conversation history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

/// A role-tagged chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    /// Name of the participant that produced the message
    pub source: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            source: source.into(),
            content: content.into(),
        }
    }

    pub fn assistant(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            source: source.into(),
            content: content.into(),
        }
    }

    #[allow(dead_code)]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            source: "system".to_string(),
            content: content.into(),
        }
    }
}

/// Reply produced by the tool-dispatch loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReply {
    /// Always false: the conversation end is signalled by the TERMINATE text instead
    pub is_final: bool,
    pub text: String,
}

impl GeneratedReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            is_final: false,
            text: text.into(),
        }
    }
}

/// Response returned to the chat for one batch of incoming messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentResponse {
    pub message: ChatMessage,
    /// Whether the message is an error report
    pub is_error: bool,
}
