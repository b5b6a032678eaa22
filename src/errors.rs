//! Error types for the chat client
//!
//! Network failures on the chat and health routes never reach callers as
//! errors; they are folded into in-band snapshots or a `false` health result.
//! These types cover everything else: configuration, preference storage,
//! and the reasons carried inside those in-band reports.

use thiserror::Error;

/// Main error type for the chat client
#[derive(Error, Debug)]
pub enum ChatError {
    /// HTTP client errors
    #[error("{0}")]
    HttpError(#[from] reqwest::Error),

    /// Response body could not be read to the end
    #[error("{0}")]
    StreamingError(String),

    /// Server answered without any body bytes
    #[error("Empty response")]
    EmptyResponse,

    /// Query rejected before sending
    #[error("Query must not be empty")]
    EmptyQuery,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Preference store errors
    #[error("Preference store error: {0}")]
    StoreError(String),

    /// Preferences file is not valid TOML
    #[error("Failed to parse preferences: {0}")]
    PreferencesParse(#[from] toml::de::Error),

    /// Preferences could not be rendered as TOML
    #[error("Failed to serialize preferences: {0}")]
    PreferencesSerialize(#[from] toml::ser::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for chat client operations
pub type Result<T> = std::result::Result<T, ChatError>;

impl ChatError {
    /// Text delivered as the answer snapshot when an exchange fails
    pub fn to_answer_text(&self) -> String {
        format!("Error: {}", self)
    }
}
