//! Command Channel
//!
//! Request/response RPC session over one [`Transport`]. Owns login/logout,
//! the single send-then-receive chokepoint every command funnels through,
//! and the safe-mode gate on trade execution.
//!
//! The protocol carries no request identifiers: a reply is paired with the
//! most recently sent command purely by ordering, so the channel keeps at
//! most one request outstanding (guaranteed here by `&mut self`).

use std::fmt;

use serde_json::{Value, json};

use crate::application::ports::Transport;
use crate::domain::account::AccountType;
use crate::domain::error::{Error, Result};
use crate::domain::protocol;
use crate::domain::trading::TradeTransInfo;

/// Request-channel session over a [`Transport`].
pub struct Socket {
    transport: Box<dyn Transport>,
    host: String,
    safe_mode: bool,
}

impl Socket {
    /// Create a session over `transport` targeting `host`.
    ///
    /// Safe mode starts enabled; call [`Socket::set_safe_mode`] to allow
    /// trade execution.
    #[must_use]
    pub fn new(transport: Box<dyn Transport>, host: impl Into<String>) -> Self {
        Self {
            transport,
            host: host.into(),
            safe_mode: true,
        }
    }

    /// Whether trade execution is currently blocked.
    #[must_use]
    pub const fn safe_mode(&self) -> bool {
        self.safe_mode
    }

    /// Enable or disable the safe-mode gate on trade execution.
    pub fn set_safe_mode(&mut self, enabled: bool) {
        self.safe_mode = enabled;
    }

    /// Connect to the request endpoint and authenticate.
    ///
    /// `account_type` is validated before any I/O, so an unknown category
    /// never opens a connection. On success returns the stream session token
    /// the server issued for the subscription channel.
    ///
    /// # Errors
    ///
    /// [`Error::LoginFailed`] when the account type is unknown or the server
    /// rejects the session (the serialized server reply is carried in the
    /// error); [`Error::ConnectionClosed`] when the transport fails.
    pub async fn login(
        &mut self,
        account_id: &str,
        password: &str,
        account_type: &str,
    ) -> Result<String> {
        let account: AccountType = account_type.parse()?;

        self.transport
            .connect(&account.request_url(&self.host))
            .await?;
        tracing::debug!(account_type = %account, "Connected to request endpoint");

        let command = json!({
            "command": "login",
            "arguments": {
                "userId": account_id,
                "password": password,
            }
        });
        let reply = self.request(&command).await?;

        if !protocol::is_status_ok(&reply) {
            return Err(Error::LoginFailed(reply.to_string()));
        }
        match protocol::stream_session_id(&reply) {
            Some(session) if !session.is_empty() => {
                tracing::info!(account_type = %account, "Login accepted");
                Ok(session.to_string())
            }
            _ => Err(Error::LoginFailed(reply.to_string())),
        }
    }

    /// Send the logout command and close the connection.
    ///
    /// The connection comes down unconditionally: a logout exchange that
    /// fails or returns garbage still tears the transport down before the
    /// error is surfaced, so no open connection outlives the session.
    ///
    /// # Errors
    ///
    /// [`Error::ConnectionClosed`] when the logout exchange or the teardown
    /// fails; the transport is disconnected either way.
    pub async fn logout(&mut self) -> Result<Value> {
        let reply = self.request(&json!({"command": "logout"})).await;
        let closed = self.transport.disconnect().await;
        let reply = reply?;
        closed?;
        tracing::info!("Logged out");
        Ok(reply)
    }

    /// Send one command and wait for the paired reply.
    ///
    /// The single chokepoint every RPC funnels through. The raw reply is
    /// returned unjudged: a `status: false` payload is data, not an error.
    ///
    /// # Errors
    ///
    /// [`Error::ConnectionClosed`] when the connection is not open, the
    /// write fails, or the reply cannot be read.
    pub async fn request(&mut self, command: &Value) -> Result<Value> {
        self.transport.send(command).await?;
        self.transport.receive().await
    }

    /// Execute, modify, or delete a trade.
    ///
    /// While safe mode is enabled the command never reaches the wire and a
    /// synthetic rejection is returned instead.
    ///
    /// # Errors
    ///
    /// [`Error::ConnectionClosed`] when safe mode is off and the transport
    /// fails.
    pub async fn trade_transaction(&mut self, info: &TradeTransInfo) -> Result<Value> {
        if self.safe_mode {
            tracing::warn!(symbol = %info.symbol, "Trade transaction blocked by safe mode");
            return Ok(protocol::safe_mode_rejection());
        }

        self.request(&json!({
            "command": "tradeTransaction",
            "arguments": { "tradeTransInfo": info }
        }))
        .await
    }

    /// Close the connection without logging out.
    ///
    /// # Errors
    ///
    /// Propagates transport teardown failures; closing an already-closed
    /// channel succeeds.
    pub async fn disconnect(&mut self) -> Result<()> {
        self.transport.disconnect().await
    }
}

impl fmt::Debug for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Socket")
            .field("host", &self.host)
            .field("safe_mode", &self.safe_mode)
            .finish_non_exhaustive()
    }
}
