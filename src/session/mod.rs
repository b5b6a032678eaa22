//! Conversation session
//!
//! Ties the preference store, the chat client and the message history
//! together the way a chat screen drives them: the user's message is
//! appended when a query is sent, the bot's answer when its stream
//! completes. Rendering is left to the caller through the update callback.

use tracing::info;

use crate::config::{ClientConfig, KeyValueStore, ServerEndpoint};
use crate::errors::{ChatError, Result};
use crate::streaming::{ChatClient, Snapshot, StreamEvent};
use crate::types::Message;

/// Chat session state
pub struct ChatSession<S: KeyValueStore> {
    store: S,
    client: ChatClient,
    history: Vec<Message>,
    thinking: String,
    connection_available: bool,
}

impl<S: KeyValueStore> ChatSession<S> {
    /// Create session using the endpoint saved in `store`
    pub fn new(store: S) -> Result<Self> {
        Self::with_config(store, ClientConfig::default())
    }

    pub fn with_config(store: S, config: ClientConfig) -> Result<Self> {
        let endpoint = ServerEndpoint::load(&store);
        let client = ChatClient::with_config(endpoint, config)?;

        Ok(Self {
            store,
            client,
            history: vec![Message::welcome()],
            thinking: String::new(),
            connection_available: true,
        })
    }

    /// Messages exchanged so far, oldest first
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Thinking text of the most recent exchange
    pub fn thinking(&self) -> &str {
        &self.thinking
    }

    pub fn client(&self) -> &ChatClient {
        &self.client
    }

    pub fn endpoint(&self) -> &ServerEndpoint {
        self.client.endpoint()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Result of the last health check; assumed true until one runs
    pub fn connection_available(&self) -> bool {
        self.connection_available
    }

    /// Run the health check and remember the result
    pub async fn check_connection(&mut self) -> bool {
        self.connection_available = self.client.test_connection().await;
        self.connection_available
    }

    /// Save an address typed by the user and re-test the connection
    pub async fn save_server_address(&mut self, input: &str) -> Result<bool> {
        let endpoint = ServerEndpoint::from_user_input(input);
        endpoint.save(&mut self.store)?;
        info!(endpoint = %endpoint, "server address saved");

        self.client.set_endpoint(endpoint);
        Ok(self.check_connection().await)
    }

    /// Send a query and record the exchange
    ///
    /// `on_update` sees every snapshot as it arrives. Once the stream
    /// completes the latest answer text is appended as the bot's message,
    /// which is returned. Empty queries are rejected without touching the
    /// history.
    pub async fn send<F>(&mut self, query: &str, mut on_update: F) -> Result<&Message>
    where
        F: FnMut(&Snapshot),
    {
        if query.is_empty() {
            return Err(ChatError::EmptyQuery);
        }

        self.history.push(Message::user(query));
        self.thinking.clear();

        let mut events = self.client.send_message(query);
        let mut latest = Snapshot::default();
        while let Some(event) = events.next_event().await {
            match event {
                StreamEvent::Update(snapshot) => {
                    on_update(&snapshot);
                    latest = snapshot;
                }
                StreamEvent::Complete => break,
            }
        }

        self.thinking = latest.thinking;
        self.history.push(Message::bot(latest.answer));

        self.history
            .last()
            .ok_or_else(|| ChatError::Generic("conversation history is empty".to_string()))
    }
}
