use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Companion chat history, scoped to a single calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub day: NaiveDate,
    pub messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            messages: Vec::new(),
        }
    }

    /// Clears the history when `today` is a different day. Returns true on reset.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.day == today {
            return false;
        }
        self.day = today;
        self.messages.clear();
        true
    }
}
