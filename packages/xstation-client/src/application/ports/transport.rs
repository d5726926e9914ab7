//! Transport Port
//!
//! Boundary between session logic and the wire. The session services speak
//! whole JSON commands; an implementation moves them over a WebSocket, and
//! tests substitute a mock to script server behavior without any I/O.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::error::Result;

/// Message-oriented transport for one endpoint connection.
///
/// A transport is single-use: once disconnected it stays closed and cannot
/// be reconnected. Implementations fold every wire-level failure into
/// [`Error::ConnectionClosed`](crate::Error::ConnectionClosed).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send {
    /// Open the connection to `url`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ConnectionClosed`](crate::Error::ConnectionClosed)
    /// when the endpoint is unreachable, the handshake fails, or the
    /// transport was already used.
    async fn connect(&mut self, url: &str) -> Result<()>;

    /// Close the connection. Idempotent: closing a connection that never
    /// opened, or closing twice, succeeds.
    ///
    /// # Errors
    ///
    /// Implementations are expected not to fail on teardown; the signature
    /// allows it for adapters that must surface shutdown faults.
    async fn disconnect(&mut self) -> Result<()>;

    /// Serialize `command` and send it as one text frame.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ConnectionClosed`](crate::Error::ConnectionClosed)
    /// when the connection is not open or the write fails.
    async fn send(&mut self, command: &Value) -> Result<()>;

    /// Wait for the next JSON frame, skipping non-text frames.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ConnectionClosed`](crate::Error::ConnectionClosed)
    /// when the connection is not open, the peer closes it, or a frame does
    /// not parse as JSON.
    async fn receive(&mut self) -> Result<Value>;
}
