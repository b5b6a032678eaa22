//! Chat server streaming client
//!
//! Provides the two server exchanges:
//! - `POST {endpoint}/chat`: newline-delimited text stream, classified line
//!   by line into thinking and answer text
//! - `GET {endpoint}/health`: plain `online` body when the server is up
//!
//! Every exchange runs on a spawned tokio task. Results come back either as
//! a [`ResponseStream`] of [`StreamEvent`]s or through callbacks. Transport
//! failures are reported in-band and never returned as errors.

use crate::config::{BodyEncoding, ClientConfig, ServerEndpoint};
use crate::errors::{ChatError, Result};
use crate::streaming::lines::LineDecoder;
use crate::streaming::parser::{Snapshot, StreamState};
use futures_util::{Stream, StreamExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Route for chat queries
pub const CHAT_ROUTE: &str = "chat";

/// Route for the health check
pub const HEALTH_ROUTE: &str = "health";

/// Body the health route returns when the server is up
pub const HEALTH_ONLINE: &str = "online";

/// Events buffered between the exchange task and the consumer
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// One item of a chat exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Snapshot after a processed line, or an error report
    Update(Snapshot),

    /// Exchange finished; always the last event
    Complete,
}

/// Events of a single chat exchange, in line-arrival order
///
/// Finite and not restartable: yields updates, exactly one
/// [`StreamEvent::Complete`], then ends. Dropping it stops the exchange
/// at its next emission.
#[derive(Debug)]
pub struct ResponseStream {
    receiver: mpsc::Receiver<StreamEvent>,
}

impl ResponseStream {
    /// Wait for the next event
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }
}

impl Stream for ResponseStream {
    type Item = StreamEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

/// Chat server client
///
/// The underlying HTTP client is shared by every exchange issued from this
/// instance.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: ServerEndpoint,
    config: ClientConfig,
}

impl ChatClient {
    /// Create client with default transport settings
    pub fn new(endpoint: ServerEndpoint) -> Result<Self> {
        Self::with_config(endpoint, ClientConfig::default())
    }

    /// Create client with custom transport settings
    pub fn with_config(endpoint: ServerEndpoint, config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(ChatError::HttpError)?;

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// Point subsequent exchanges at a new server
    pub fn set_endpoint(&mut self, endpoint: ServerEndpoint) {
        self.endpoint = endpoint;
    }

    pub fn endpoint(&self) -> &ServerEndpoint {
        &self.endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the `/chat` request body for `query`
    pub fn request_body(&self, query: &str) -> String {
        match self.config.body_encoding {
            BodyEncoding::Raw => format!(r#"{{"query": "{}"}}"#, query),
            BodyEncoding::Escaped => serde_json::json!({ "query": query }).to_string(),
        }
    }

    /// Send a query and stream the response
    ///
    /// Returns immediately; the exchange runs on the tokio runtime, so this
    /// must be called from within one. Callers are expected to filter out
    /// empty queries.
    pub fn send_message(&self, query: &str) -> ResponseStream {
        let (sender, receiver) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let exchange = Exchange {
            client: self.client.clone(),
            url: self.endpoint.url(CHAT_ROUTE),
            body: self.request_body(query),
            read_timeout: self.config.read_timeout(),
            sender,
        };
        tokio::spawn(exchange.run());

        ResponseStream { receiver }
    }

    /// Callback form of [`ChatClient::send_message`]
    ///
    /// `on_update` receives `(answer, thinking)` for every snapshot in order;
    /// `on_complete` runs exactly once, after the last update.
    pub fn send_message_with<U, C>(&self, query: &str, mut on_update: U, on_complete: C) -> JoinHandle<()>
    where
        U: FnMut(&str, &str) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        let mut events = self.send_message(query);

        tokio::spawn(async move {
            while let Some(event) = events.next_event().await {
                match event {
                    StreamEvent::Update(snapshot) => on_update(&snapshot.answer, &snapshot.thinking),
                    StreamEvent::Complete => break,
                }
            }
            on_complete();
        })
    }

    /// Check whether the server reports itself online
    ///
    /// True only for a successful status with a body that trims to exactly
    /// `online`. Every failure collapses to false.
    pub async fn test_connection(&self) -> bool {
        match self.fetch_health().await {
            Ok(online) => online,
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "health check failed");
                false
            }
        }
    }

    /// Callback form of [`ChatClient::test_connection`]
    pub fn test_connection_with<F>(&self, on_result: F) -> JoinHandle<()>
    where
        F: FnOnce(bool) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            let online = client.test_connection().await;
            on_result(online);
        })
    }

    async fn fetch_health(&self) -> Result<bool> {
        let response = self.client.get(self.endpoint.url(HEALTH_ROUTE)).send().await?;
        let success = response.status().is_success();

        let body = tokio::time::timeout(self.config.read_timeout(), response.text())
            .await
            .map_err(|_| read_timeout_error(self.config.read_timeout()))??;

        Ok(success && body.trim() == HEALTH_ONLINE)
    }
}

/// A single in-flight chat request and the parser state it owns
struct Exchange {
    client: Client,
    url: String,
    body: String,
    read_timeout: Duration,
    sender: mpsc::Sender<StreamEvent>,
}

impl Exchange {
    async fn run(self) {
        debug!(url = %self.url, "sending chat request");

        match self.stream_response().await {
            Ok(lines) => debug!(url = %self.url, lines, "chat stream finished"),
            Err(e) => {
                warn!(url = %self.url, error = %e, "chat request failed");
                self.emit(Snapshot::error(e.to_answer_text())).await;
            }
        }

        let _ = self.sender.send(StreamEvent::Complete).await;
    }

    /// Read the body line by line; returns the number of lines read
    async fn stream_response(&self) -> Result<usize> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(self.body.clone())
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(url = %self.url, status = %response.status(), "chat server returned an error status");
        }

        let mut body = response.bytes_stream();
        let mut decoder = LineDecoder::new();
        let mut state = StreamState::new();
        let mut received = 0usize;
        let mut lines = 0usize;

        loop {
            let chunk = match tokio::time::timeout(self.read_timeout, body.next()).await {
                Ok(Some(chunk)) => chunk.map_err(|e| ChatError::StreamingError(e.to_string()))?,
                Ok(None) => break,
                Err(_) => return Err(read_timeout_error(self.read_timeout)),
            };
            received += chunk.len();

            for line in decoder.push(&chunk) {
                lines += 1;
                if !self.feed(&mut state, &line).await {
                    return Ok(lines);
                }
            }
        }

        if let Some(line) = decoder.finish() {
            lines += 1;
            if !self.feed(&mut state, &line).await {
                return Ok(lines);
            }
        }

        if received == 0 {
            return Err(ChatError::EmptyResponse);
        }

        if let Some(snapshot) = state.finish() {
            self.emit(snapshot).await;
        }

        Ok(lines)
    }

    /// Returns false once the consumer has gone away
    async fn feed(&self, state: &mut StreamState, line: &str) -> bool {
        match state.apply(line) {
            Some(snapshot) => self.emit(snapshot).await,
            None => true,
        }
    }

    async fn emit(&self, snapshot: Snapshot) -> bool {
        self.sender.send(StreamEvent::Update(snapshot)).await.is_ok()
    }
}

fn read_timeout_error(timeout: Duration) -> ChatError {
    ChatError::StreamingError(format!("read timed out after {}s", timeout.as_secs()))
}
