//! Chat transcript kept by the dashboard's assistant panel.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default = "Local::now")]
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Local::now(),
        }
    }
}

/// Ordered conversation plus the "waiting for a reply" flag.
///
/// At most one question is in flight: [`Transcript::submit`] refuses new
/// input until [`Transcript::receive`] delivers the reply.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user question and mark a reply as pending.
    ///
    /// Returns the history to send (including the new question), or `None`
    /// when the input is blank or a reply is already pending.
    pub fn submit(&mut self, input: &str) -> Option<Vec<ChatMessage>> {
        if input.trim().is_empty() || self.pending {
            return None;
        }
        self.messages.push(ChatMessage::user(input));
        self.pending = true;
        Some(self.messages.clone())
    }

    /// Append the assistant's reply and clear the pending flag.
    pub fn receive(&mut self, reply: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(reply));
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_appends_and_returns_history() {
        let mut t = Transcript::new();
        let history = t.submit("is 840 normal?").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, ChatRole::User);
        assert!(t.is_pending());
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut t = Transcript::new();
        assert!(t.submit("   ").is_none());
        assert!(t.submit("").is_none());
        assert!(t.is_empty());
        assert!(!t.is_pending());
    }

    #[test]
    fn second_question_waits_for_reply() {
        let mut t = Transcript::new();
        t.submit("first").unwrap();
        assert!(t.submit("second").is_none());
        t.receive("answer");
        assert!(!t.is_pending());

        let history = t.submit("second").unwrap();
        let roles: Vec<ChatRole> = history.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::User, ChatRole::Assistant, ChatRole::User]);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_value(ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn message_without_timestamp_deserializes() {
        let m: ChatMessage = serde_json::from_str(r#"{"role":"user","content":"q"}"#).unwrap();
        assert_eq!(m.role, ChatRole::User);
        assert_eq!(m.content, "q");
    }
}
