//! cschat - Streaming chat client core
//!
//! Sends text queries to a chat server and turns its line-oriented
//! response stream into incremental (answer, thinking) snapshots.
//!
//! # Architecture
//!
//! - **streaming**: `/chat` and `/health` exchanges, body line splitting,
//!   thinking/answer classification
//! - **config**: transport settings and the persisted server address
//! - **session**: message history driven by completed exchanges

pub mod errors;
pub mod types;
pub mod config;
pub mod streaming;
pub mod session;

// Re-export commonly used types
pub use errors::{ChatError, Result};
pub use config::{ClientConfig, KeyValueStore, ServerEndpoint};
pub use session::ChatSession;
pub use streaming::{ChatClient, ResponseStream, Snapshot, StreamEvent};
pub use types::{Message, Sender};
