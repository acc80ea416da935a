//! Conversation history for the display layer.

use serde::{Deserialize, Serialize};

/// The author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single display-facing conversation turn.
///
/// Turns are held for rendering only; retrieval and generation never read
/// past turns — the prompt carries only the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who authored the turn.
    pub role: Role,
    /// The turn's text content.
    pub content: String,
}

/// Append-only ordered sequence of conversation turns.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ChatHistory {
    turns: Vec<ConversationTurn>,
}

impl ChatHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn.
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(ConversationTurn { role, content: content.into() });
    }

    /// The turns in append order.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the history has no turns yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
