//! Message types for the conversation history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Greeting the conversation starts with
pub const WELCOME_MESSAGE: &str =
    "Welcome! I am the CI536 Laptop Bot, ask me any questions regarding laptops to begin.";

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    You,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::You => "You",
            Sender::Bot => "Bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the conversation; never modified after it is appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub is_user: bool,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            is_user: sender == Sender::You,
            sent_at: Utc::now(),
        }
    }

    /// Query typed by the user
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::You, text)
    }

    /// Final answer of a completed exchange
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    pub fn welcome() -> Self {
        Self::bot(WELCOME_MESSAGE)
    }
}
