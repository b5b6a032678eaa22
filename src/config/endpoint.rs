//! Server address preference

use std::fmt;

use crate::config::store::KeyValueStore;
use crate::errors::Result;

/// Preference key holding the server address
pub const SERVER_URL_KEY: &str = "server_url";

/// Address used until the user saves one
pub const DEFAULT_SERVER_URL: &str = "http://0.0.0.0:5000";

/// Port the chat server listens on
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Base URL (scheme + host + port) for the chat server
///
/// Read once from the store at startup; this in-memory copy is what
/// requests use until the next save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    base_url: String,
}

impl ServerEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Load from the store, falling back to [`DEFAULT_SERVER_URL`]
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self::new(store.get_string(SERVER_URL_KEY, DEFAULT_SERVER_URL))
    }

    /// Persist to the store
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.put_string(SERVER_URL_KEY, &self.base_url)
    }

    /// Normalize an address typed into the settings dialog
    ///
    /// Kept as typed when it already has the `http://` scheme and the
    /// server port; anything else is treated as a bare host.
    pub fn from_user_input(input: &str) -> Self {
        let port_suffix = format!(":{}", DEFAULT_SERVER_PORT);
        if input.starts_with("http://") && input.ends_with(&port_suffix) {
            Self::new(input)
        } else {
            Self::new(format!("http://{}{}", input, port_suffix))
        }
    }

    /// Full URL for a route such as `chat` or `/health`
    pub fn url(&self, route: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            route.trim_start_matches('/')
        )
    }

    pub fn as_str(&self) -> &str {
        &self.base_url
    }
}

impl Default for ServerEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url)
    }
}
