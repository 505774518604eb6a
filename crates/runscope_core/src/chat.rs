//! Chat transcript messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who sent a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(from = "String", into = "String")]
pub enum Sender {
    /// The end user
    #[display("user")]
    User,
    /// The assistant
    #[display("assistant")]
    Assistant,
    /// Any other sender value
    #[display("{}", _0)]
    Other(String),
}

impl From<String> for Sender {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "user" => Self::User,
            "assistant" => Self::Assistant,
            _ => Self::Other(raw),
        }
    }
}

impl From<Sender> for String {
    fn from(sender: Sender) -> Self {
        sender.to_string()
    }
}

/// A single message of a user's chat history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Row ID
    pub message_id: String,
    /// User the conversation belongs to
    pub user_id: String,
    /// Sender role
    pub sender: Sender,
    /// Message type tag written by the chat service
    #[serde(default)]
    pub message_type: Option<String>,
    /// Plain-text content
    #[serde(default)]
    pub content_text: Option<String>,
    /// Structured content
    #[serde(default)]
    pub content_json: Option<serde_json::Value>,
    /// Creation time
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Whether the end user sent this message.
    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}
