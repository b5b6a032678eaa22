//! Streaming client module
//!
//! Provides the chat server client, the body line splitter and the
//! thinking/answer line classifier.

pub mod client;
pub mod lines;
pub mod parser;

// Re-export commonly used types
pub use client::{ChatClient, ResponseStream, StreamEvent};
pub use lines::LineDecoder;
pub use parser::{fold_line, parse_lines, ParserMode, Snapshot, StreamState, THINK_CLOSE, THINK_OPEN};
