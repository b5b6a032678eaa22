//! Configuration for the chat client
//!
//! Transport settings live in [`ClientConfig`]; the server address is a
//! persisted preference handled by [`endpoint`] on top of an injected
//! [`store::KeyValueStore`].

pub mod endpoint;
pub mod store;

pub use endpoint::{ServerEndpoint, DEFAULT_SERVER_URL, SERVER_URL_KEY};
pub use store::{KeyValueStore, MemoryStore, TomlFileStore};

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{ChatError, Result};

/// How the query is placed into the `/chat` request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyEncoding {
    /// Query substituted verbatim into `{"query": "..."}`.
    ///
    /// Quotes, backslashes and control characters in the query produce an
    /// invalid JSON body. This is the wire form existing servers receive.
    #[default]
    Raw,

    /// Query serialized as a proper JSON string
    Escaped,
}

/// Transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub connect_timeout_secs: u64,
    /// Maximum wait for each body chunk
    pub read_timeout_secs: u64,
    #[serde(default)]
    pub body_encoding: BodyEncoding,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 60,
            read_timeout_secs: 60,
            body_encoding: BodyEncoding::Raw,
        }
    }
}

impl ClientConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout_secs == 0 {
            return Err(ChatError::ConfigError(
                "connect_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.read_timeout_secs == 0 {
            return Err(ChatError::ConfigError(
                "read_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}
