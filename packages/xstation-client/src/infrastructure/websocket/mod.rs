//! WebSocket Transport
//!
//! TLS WebSocket adapter implementing the [`Transport`] port on top of
//! tokio-tungstenite. Connections are single-use, outbound frames are
//! throttled, and a background task pings the server while the connection
//! is open.

mod keepalive;
mod throttle;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::application::ports::Transport;
use crate::domain::error::{Error, Result};
use crate::infrastructure::config::TransportSettings;
use keepalive::KeepAliveHandle;
use throttle::Throttle;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;
type SharedSink = Arc<Mutex<WsSink>>;

/// Lifecycle of a [`WsConnection`].
///
/// Connections move strictly forward; a closed connection is never reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection attempt has been made yet.
    Disconnected,
    /// Connection establishment is in flight.
    Connecting,
    /// Connected and usable.
    Open,
    /// Teardown is in flight.
    Closing,
    /// Torn down; terminal.
    Closed,
}

impl ConnectionState {
    /// Whether frames can be sent and received in this state.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Single-use TLS WebSocket connection.
pub struct WsConnection {
    settings: TransportSettings,
    state: ConnectionState,
    sink: Option<SharedSink>,
    source: Option<WsSource>,
    keep_alive: Option<KeepAliveHandle>,
    throttle: Throttle,
}

impl WsConnection {
    /// Create an unconnected transport with the given settings.
    #[must_use]
    pub const fn new(settings: TransportSettings) -> Self {
        let throttle = Throttle::new(settings.request_interval);
        Self {
            settings,
            state: ConnectionState::Disconnected,
            sink: None,
            source: None,
            keep_alive: None,
            throttle,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    fn ensure_open(&self) -> Result<()> {
        if !self.state.is_open() {
            return Err(Error::ConnectionClosed("not connected".to_string()));
        }
        if let Some(failure) = self.keep_alive.as_ref().and_then(KeepAliveHandle::failure) {
            return Err(Error::ConnectionClosed(failure));
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for WsConnection {
    async fn connect(&mut self, url: &str) -> Result<()> {
        match self.state {
            ConnectionState::Disconnected => {}
            ConnectionState::Closed => {
                return Err(Error::ConnectionClosed(
                    "connection is closed and cannot be reused".to_string(),
                ));
            }
            _ => {
                return Err(Error::ConnectionClosed(
                    "connection already open".to_string(),
                ));
            }
        }

        self.state = ConnectionState::Connecting;
        let connecting = tokio_tungstenite::connect_async(url);
        let (ws_stream, _response) =
            match tokio::time::timeout(self.settings.connect_timeout, connecting).await {
                Ok(Ok(pair)) => pair,
                Ok(Err(e)) => {
                    self.state = ConnectionState::Disconnected;
                    return Err(Error::ConnectionClosed(e.to_string()));
                }
                Err(_) => {
                    self.state = ConnectionState::Disconnected;
                    return Err(Error::ConnectionClosed(format!(
                        "connect timed out after {:?}",
                        self.settings.connect_timeout
                    )));
                }
            };

        let (sink, source) = ws_stream.split();
        let sink = Arc::new(Mutex::new(sink));
        self.keep_alive = Some(keepalive::spawn(
            Arc::clone(&sink),
            self.settings.keep_alive_interval,
        ));
        self.sink = Some(sink);
        self.source = Some(source);
        self.state = ConnectionState::Open;
        tracing::info!(url, "WebSocket connection established");
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        if matches!(
            self.state,
            ConnectionState::Disconnected | ConnectionState::Closed
        ) {
            return Ok(());
        }
        self.state = ConnectionState::Closing;

        if let Some(mut keep_alive) = self.keep_alive.take() {
            keep_alive.shutdown().await;
        }

        // The close handshake is best effort; the connection is being
        // discarded either way.
        if let Some(sink) = self.sink.take() {
            if let Err(e) = sink.lock().await.close().await {
                match e {
                    tokio_tungstenite::tungstenite::Error::ConnectionClosed
                    | tokio_tungstenite::tungstenite::Error::AlreadyClosed => {
                        tracing::debug!(error = %e, "Close handshake on dead connection");
                    }
                    other => {
                        tracing::warn!(error = %other, "Close handshake failed");
                    }
                }
            }
        }

        self.source = None;
        self.state = ConnectionState::Closed;
        tracing::info!("WebSocket connection closed");
        Ok(())
    }

    async fn send(&mut self, command: &Value) -> Result<()> {
        self.ensure_open()?;
        let Some(sink) = self.sink.clone() else {
            return Err(Error::ConnectionClosed("not connected".to_string()));
        };

        self.throttle.acquire().await;
        let frame = command.to_string();
        sink.lock()
            .await
            .send(Message::Text(frame.into()))
            .await
            .map_err(|e| Error::ConnectionClosed(e.to_string()))?;
        self.throttle.mark();
        Ok(())
    }

    async fn receive(&mut self) -> Result<Value> {
        self.ensure_open()?;
        let Some(source) = self.source.as_mut() else {
            return Err(Error::ConnectionClosed("not connected".to_string()));
        };

        loop {
            match source.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str(text.as_str())
                        .map_err(|e| Error::ConnectionClosed(format!("malformed frame: {e}")));
                }
                Some(Ok(Message::Ping(payload))) => {
                    if let Some(sink) = &self.sink {
                        sink.lock()
                            .await
                            .send(Message::Pong(payload))
                            .await
                            .map_err(|e| Error::ConnectionClosed(e.to_string()))?;
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(?frame, "Server sent close frame");
                    return Err(Error::ConnectionClosed(
                        "connection closed by peer".to_string(),
                    ));
                }
                Some(Ok(other)) => {
                    tracing::trace!(frame_type = ?other, "Skipping non-text frame");
                }
                Some(Err(e)) => {
                    return Err(Error::ConnectionClosed(e.to_string()));
                }
                None => {
                    return Err(Error::ConnectionClosed(
                        "connection closed by peer".to_string(),
                    ));
                }
            }
        }
    }
}

impl fmt::Debug for WsConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WsConnection")
            .field("state", &self.state)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
