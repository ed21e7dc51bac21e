//! Shared types for the receptionist workspace.
//!
//! This crate holds the conversation model passed between the call handlers
//! and the chat-completion client, plus the business profile the system
//! prompt is rendered from. Every other crate in the workspace depends on it
//! for these definitions, so it carries no runtime dependencies beyond
//! `serde`.

pub mod business;

pub use business::BusinessProfile;

use serde::{Deserialize, Serialize};

/// Speaker of a single chat turn.
///
/// Serialized in lowercase, which is the role tag the chat-completion wire
/// format expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions that frame the whole conversation.
    System,
    /// Transcribed caller speech.
    User,
    /// Model reply spoken back to the caller.
    Assistant,
}

impl ChatRole {
    /// Returns the wire label for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in a call's conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}
