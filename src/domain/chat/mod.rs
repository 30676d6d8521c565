//! Conversation history types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::llm::Message;

/// Role of a conversation turn. History only ever contains user and
/// assistant turns; system messages are built by the pipeline itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// A single immutable turn in a conversation.
///
/// The pipeline receives a bounded window of recent turns from the caller;
/// it never accumulates or persists history itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }

    /// Convert into an LLM message for prompt assembly.
    pub fn to_message(&self) -> Message {
        match self.role {
            TurnRole::User => Message::user(self.content.clone()),
            TurnRole::Assistant => Message::assistant(self.content.clone()),
        }
    }
}

/// Take the trailing `window` turns of a history slice.
pub fn recent_turns(history: &[ChatTurn], window: usize) -> &[ChatTurn] {
    let start = history.len().saturating_sub(window);
    &history[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MessageRole;

    #[test]
    fn test_turn_to_message() {
        let turn = ChatTurn::user("Hello");
        let msg = turn.to_message();
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content(), "Hello");

        let turn = ChatTurn::assistant("Hi there");
        assert_eq!(turn.to_message().role, MessageRole::Assistant);
    }

    #[test]
    fn test_recent_turns_window() {
        let history: Vec<ChatTurn> = (0..10)
            .map(|i| ChatTurn::user(format!("message {}", i)))
            .collect();

        let window = recent_turns(&history, 6);
        assert_eq!(window.len(), 6);
        assert_eq!(window[0].content, "message 4");
        assert_eq!(window[5].content, "message 9");
    }

    #[test]
    fn test_recent_turns_short_history() {
        let history = vec![ChatTurn::user("only one")];
        assert_eq!(recent_turns(&history, 6).len(), 1);
        assert!(recent_turns(&[], 6).is_empty());
    }
}
