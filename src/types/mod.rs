//! Type definitions module
//!
//! Conversation messages exchanged between the user and the chat server.

pub mod messages;

// Re-export commonly used types
pub use messages::{Message, Sender, WELCOME_MESSAGE};
