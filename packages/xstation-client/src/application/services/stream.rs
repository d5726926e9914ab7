//! Subscription Channel
//!
//! Fire-and-forget subscription management over the `xStation5` streaming
//! endpoint. Subscribe commands carry the stream session token at the top
//! level of the JSON object (not under `arguments`); stop commands omit it.
//! Pushed frames are demultiplexed by the caller on their `command` field.

use std::fmt;

use serde_json::{Value, json};

use crate::application::ports::Transport;
use crate::domain::error::Result;

/// Default `minArrivalTime` for tick subscriptions: no server-side pacing.
pub const DEFAULT_TICK_MIN_ARRIVAL_TIME: i64 = 0;

/// Default order-book depth for tick subscriptions.
pub const DEFAULT_TICK_MAX_LEVEL: i64 = 2;

/// Push-subscription channel bound to one login session.
///
/// Created by [`XStationClient::client_stream`](crate::XStationClient::client_stream)
/// after a successful login; the session token is embedded in every
/// subscribe command. Subscriptions are fire-and-forget: the server never
/// acknowledges them, it just starts (or stops) pushing.
pub struct ClientStream {
    transport: Box<dyn Transport>,
    stream_url: String,
    stream_session_id: String,
}

impl ClientStream {
    /// Create a subscription channel over `transport`.
    ///
    /// `stream_session_id` must be the token issued by a successful login on
    /// the request channel.
    #[must_use]
    pub fn new(
        transport: Box<dyn Transport>,
        stream_url: impl Into<String>,
        stream_session_id: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            stream_url: stream_url.into(),
            stream_session_id: stream_session_id.into(),
        }
    }

    /// Streaming endpoint URL this channel targets.
    #[must_use]
    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }

    /// Session token binding this channel to its login.
    #[must_use]
    pub fn stream_session_id(&self) -> &str {
        &self.stream_session_id
    }

    /// Connect to the streaming endpoint. Sends nothing by itself.
    ///
    /// # Errors
    ///
    /// Propagates connect failures as
    /// [`Error::ConnectionClosed`](crate::Error::ConnectionClosed).
    pub async fn open(&mut self) -> Result<()> {
        self.transport.connect(&self.stream_url).await
    }

    /// Close the channel. Idempotent.
    ///
    /// # Errors
    ///
    /// Propagates transport teardown failures.
    pub async fn close(&mut self) -> Result<()> {
        self.transport.disconnect().await
    }

    /// Wait for the next pushed frame.
    ///
    /// Frames are returned exactly as pushed; branch on
    /// [`protocol::command`](crate::domain::protocol::command) to
    /// demultiplex.
    ///
    /// # Errors
    ///
    /// [`Error::ConnectionClosed`](crate::Error::ConnectionClosed) when the
    /// channel is not open or the peer closes it.
    pub async fn listen(&mut self) -> Result<Value> {
        self.transport.receive().await
    }

    async fn send_command(&mut self, command: Value) -> Result<()> {
        tracing::trace!(%command, "Stream command");
        self.transport.send(&command).await
    }

    /// Subscribe to balance updates.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn subscribe_balance(&mut self) -> Result<()> {
        let command = json!({
            "command": "getBalance",
            "streamSessionId": self.stream_session_id,
        });
        self.send_command(command).await
    }

    /// Stop balance updates.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn stop_balance(&mut self) -> Result<()> {
        self.send_command(json!({"command": "stopBalance"})).await
    }

    /// Subscribe to per-minute candles for `symbol`.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn subscribe_candles(&mut self, symbol: &str) -> Result<()> {
        let command = json!({
            "command": "getCandles",
            "streamSessionId": self.stream_session_id,
            "symbol": symbol,
        });
        self.send_command(command).await
    }

    /// Stop candle updates for `symbol`.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn stop_candles(&mut self, symbol: &str) -> Result<()> {
        self.send_command(json!({"command": "stopCandles", "symbol": symbol}))
            .await
    }

    /// Subscribe to the server's keep-alive heartbeat pushes.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn subscribe_keep_alive(&mut self) -> Result<()> {
        let command = json!({
            "command": "getKeepAlive",
            "streamSessionId": self.stream_session_id,
        });
        self.send_command(command).await
    }

    /// Stop keep-alive pushes.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn stop_keep_alive(&mut self) -> Result<()> {
        self.send_command(json!({"command": "stopKeepAlive"})).await
    }

    /// Subscribe to news bulletins.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn subscribe_news(&mut self) -> Result<()> {
        let command = json!({
            "command": "getNews",
            "streamSessionId": self.stream_session_id,
        });
        self.send_command(command).await
    }

    /// Stop news bulletins.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn stop_news(&mut self) -> Result<()> {
        self.send_command(json!({"command": "stopNews"})).await
    }

    /// Subscribe to profit updates for open positions.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn subscribe_profits(&mut self) -> Result<()> {
        let command = json!({
            "command": "getProfits",
            "streamSessionId": self.stream_session_id,
        });
        self.send_command(command).await
    }

    /// Stop profit updates.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn stop_profits(&mut self) -> Result<()> {
        self.send_command(json!({"command": "stopProfits"})).await
    }

    /// Subscribe to tick prices for `symbol`.
    ///
    /// `min_arrival_time` is the minimum spacing between pushes in
    /// milliseconds ([`DEFAULT_TICK_MIN_ARRIVAL_TIME`] for unpaced);
    /// `max_level` caps the order-book depth ([`DEFAULT_TICK_MAX_LEVEL`]).
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn subscribe_tick_prices(
        &mut self,
        symbol: &str,
        min_arrival_time: i64,
        max_level: i64,
    ) -> Result<()> {
        let command = json!({
            "command": "getTickPrices",
            "streamSessionId": self.stream_session_id,
            "symbol": symbol,
            "minArrivalTime": min_arrival_time,
            "maxLevel": max_level,
        });
        self.send_command(command).await
    }

    /// Stop tick prices for `symbol`.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn stop_tick_prices(&mut self, symbol: &str) -> Result<()> {
        self.send_command(json!({"command": "stopTickPrices", "symbol": symbol}))
            .await
    }

    /// Subscribe to trade updates.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn subscribe_trades(&mut self) -> Result<()> {
        let command = json!({
            "command": "getTrades",
            "streamSessionId": self.stream_session_id,
        });
        self.send_command(command).await
    }

    /// Stop trade updates.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn stop_trades(&mut self) -> Result<()> {
        self.send_command(json!({"command": "stopTrades"})).await
    }

    /// Subscribe to trade status updates (execution verdicts).
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn subscribe_trade_status(&mut self) -> Result<()> {
        let command = json!({
            "command": "getTradeStatus",
            "streamSessionId": self.stream_session_id,
        });
        self.send_command(command).await
    }

    /// Stop trade status updates.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn stop_trade_status(&mut self) -> Result<()> {
        self.send_command(json!({"command": "stopTradeStatus"}))
            .await
    }

    /// Application-level ping keeping the stream session marked active.
    ///
    /// # Errors
    ///
    /// Propagates send failures.
    pub async fn ping(&mut self) -> Result<()> {
        let command = json!({
            "command": "ping",
            "streamSessionId": self.stream_session_id,
        });
        self.send_command(command).await
    }
}

impl fmt::Debug for ClientStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientStream")
            .field("stream_url", &self.stream_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use serde_json::json;

    use super::*;
    use crate::application::ports::transport::MockTransport;

    fn stream_with(transport: MockTransport) -> ClientStream {
        ClientStream::new(
            Box::new(transport),
            "wss://ws.xtb.com/demoStream",
            "8469308861804289383",
        )
    }

    #[tokio::test]
    async fn open_connects_to_stream_url() {
        let mut transport = MockTransport::new();
        transport
            .expect_connect()
            .withf(|url| url == "wss://ws.xtb.com/demoStream")
            .once()
            .returning(|_| Ok(()));

        let mut stream = stream_with(transport);
        stream.open().await.unwrap();
    }

    #[tokio::test]
    async fn subscribe_embeds_session_token_at_top_level() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .with(eq(json!({
                "command": "getCandles",
                "streamSessionId": "8469308861804289383",
                "symbol": "EURUSD",
            })))
            .once()
            .returning(|_| Ok(()));

        let mut stream = stream_with(transport);
        stream.subscribe_candles("EURUSD").await.unwrap();
    }

    #[tokio::test]
    async fn stop_omits_session_token() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .with(eq(json!({"command": "stopCandles", "symbol": "EURUSD"})))
            .once()
            .returning(|_| Ok(()));

        let mut stream = stream_with(transport);
        stream.stop_candles("EURUSD").await.unwrap();
    }

    #[tokio::test]
    async fn subscribe_is_fire_and_forget() {
        // Only a send expectation: a receive call would panic the test.
        let mut transport = MockTransport::new();
        transport.expect_send().once().returning(|_| Ok(()));

        let mut stream = stream_with(transport);
        stream.subscribe_balance().await.unwrap();
    }

    #[tokio::test]
    async fn tick_subscription_carries_pacing_fields() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .with(eq(json!({
                "command": "getTickPrices",
                "streamSessionId": "8469308861804289383",
                "symbol": "GOLD",
                "minArrivalTime": 200,
                "maxLevel": 6,
            })))
            .once()
            .returning(|_| Ok(()));

        let mut stream = stream_with(transport);
        stream.subscribe_tick_prices("GOLD", 200, 6).await.unwrap();
    }

    #[tokio::test]
    async fn default_tick_pacing_matches_upstream_defaults() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .with(eq(json!({
                "command": "getTickPrices",
                "streamSessionId": "8469308861804289383",
                "symbol": "GOLD",
                "minArrivalTime": 0,
                "maxLevel": 2,
            })))
            .once()
            .returning(|_| Ok(()));

        let mut stream = stream_with(transport);
        stream
            .subscribe_tick_prices("GOLD", DEFAULT_TICK_MIN_ARRIVAL_TIME, DEFAULT_TICK_MAX_LEVEL)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn ping_carries_session_token() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .with(eq(json!({
                "command": "ping",
                "streamSessionId": "8469308861804289383",
            })))
            .once()
            .returning(|_| Ok(()));

        let mut stream = stream_with(transport);
        stream.ping().await.unwrap();
    }

    #[tokio::test]
    async fn listen_returns_pushed_frame_unchanged() {
        let pushed = json!({"command": "candle", "data": {"open": 1.1}});
        let expected = pushed.clone();

        let mut transport = MockTransport::new();
        transport
            .expect_receive()
            .once()
            .returning(move || Ok(pushed.clone()));

        let mut stream = stream_with(transport);
        let frame = stream.listen().await.unwrap();

        assert_eq!(frame, expected);
    }

    #[tokio::test]
    async fn close_disconnects_transport() {
        let mut transport = MockTransport::new();
        transport.expect_disconnect().once().returning(|| Ok(()));

        let mut stream = stream_with(transport);
        stream.close().await.unwrap();
    }
}
