//! Session Orchestrator
//!
//! [`XStationClient`] ties the pieces together: it holds credentials and
//! policy, drives login/logout on the command channel, mints subscription
//! channels once authenticated, and exposes the typed RPC command catalog.

use std::fmt;

use serde_json::{Value, json};

use crate::application::ports::Transport;
use crate::application::services::socket::Socket;
use crate::application::services::stream::ClientStream;
use crate::domain::account::{AccountType, Credentials};
use crate::domain::error::{Error, Result};
use crate::domain::trading::{Period, TradeCmd, TradeTransInfo};
use crate::infrastructure::config::{ClientConfig, TransportSettings};
use crate::infrastructure::websocket::WsConnection;

/// High-level `xStation5` session client.
///
/// # Example
///
/// ```rust,no_run
/// use xstation_client::{ClientConfig, Credentials, XStationClient};
///
/// async fn run() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Credentials::new("10000".to_string(), "password".to_string());
///     let mut client = XStationClient::from_config(&ClientConfig::new(credentials, "demo"));
///
///     client.login().await?;
///     let symbols = client.get_all_symbols().await?;
///     println!("{symbols}");
///     client.logout().await?;
///     Ok(())
/// }
/// ```
pub struct XStationClient {
    socket: Socket,
    credentials: Credentials,
    account_type: String,
    host: String,
    transport_settings: TransportSettings,
    stream_session_id: Option<String>,
}

impl XStationClient {
    /// Create a client for `credentials` on the production host with default
    /// transport settings and safe mode enabled.
    #[must_use]
    pub fn new(credentials: Credentials, account_type: impl Into<String>) -> Self {
        Self::from_config(&ClientConfig::new(credentials, account_type))
    }

    /// Create a client from `config` using the bundled WebSocket transport.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(Box::new(WsConnection::new(config.transport.clone())), config)
    }

    /// Create a client over a caller-supplied transport.
    ///
    /// The seam tests use to script server behavior; also the way to slot in
    /// a custom transport implementation.
    #[must_use]
    pub fn with_transport(transport: Box<dyn Transport>, config: &ClientConfig) -> Self {
        let mut socket = Socket::new(transport, config.host.clone());
        socket.set_safe_mode(config.safe_mode);
        Self {
            socket,
            credentials: config.credentials.clone(),
            account_type: config.account_type.clone(),
            host: config.host.clone(),
            transport_settings: config.transport.clone(),
            stream_session_id: None,
        }
    }

    /// Connect the request channel and authenticate.
    ///
    /// On success the stream session token is stored for
    /// [`XStationClient::client_stream`].
    ///
    /// # Errors
    ///
    /// [`Error::LoginFailed`] when the account type is unknown or the server
    /// rejects the session; [`Error::ConnectionClosed`] when the transport
    /// fails.
    pub async fn login(&mut self) -> Result<()> {
        let session = self
            .socket
            .login(
                self.credentials.account_id(),
                self.credentials.password(),
                &self.account_type,
            )
            .await?;
        self.stream_session_id = Some(session);
        Ok(())
    }

    /// Log out and tear the request channel down.
    ///
    /// The stored stream session token is cleared even when the exchange
    /// fails: the session is over either way, and channels minted from it
    /// will stop receiving pushes server-side.
    ///
    /// # Errors
    ///
    /// [`Error::ConnectionClosed`] when the transport fails before the
    /// acknowledgement arrives; the token is cleared regardless.
    pub async fn logout(&mut self) -> Result<()> {
        self.stream_session_id = None;
        let ack = self.socket.logout().await?;
        tracing::debug!(%ack, "Logout acknowledged");
        Ok(())
    }

    /// Close the request channel without logging out.
    ///
    /// # Errors
    ///
    /// Propagates transport teardown failures.
    pub async fn disconnect(&mut self) -> Result<()> {
        self.stream_session_id = None;
        self.socket.disconnect().await
    }

    /// Mint a subscription channel bound to the current login session.
    ///
    /// The channel gets its own transport connection; call
    /// [`ClientStream::open`] on it before subscribing.
    ///
    /// # Errors
    ///
    /// [`Error::LoginFailed`] when called before a successful
    /// [`XStationClient::login`].
    pub fn client_stream(&self) -> Result<ClientStream> {
        let Some(session) = self.stream_session_id.as_deref().filter(|s| !s.is_empty()) else {
            return Err(Error::LoginFailed(
                "no stream session: log in before opening a stream".to_string(),
            ));
        };
        let account: AccountType = self.account_type.parse()?;
        let stream_url = account.stream_url(&self.host);
        tracing::debug!(url = %stream_url, "Minting subscription channel");
        Ok(ClientStream::new(
            Box::new(WsConnection::new(self.transport_settings.clone())),
            stream_url,
            session,
        ))
    }

    /// Stream session token issued at login, if any.
    #[must_use]
    pub fn stream_session_id(&self) -> Option<&str> {
        self.stream_session_id.as_deref()
    }

    /// Whether trade execution is currently blocked.
    #[must_use]
    pub const fn safe_mode(&self) -> bool {
        self.socket.safe_mode()
    }

    /// Enable or disable the safe-mode gate on trade execution.
    pub fn set_safe_mode(&mut self, enabled: bool) {
        self.socket.set_safe_mode(enabled);
    }

    /// Send a raw command and wait for its reply.
    ///
    /// Escape hatch for API calls without a dedicated builder.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn request(&mut self, command: &Value) -> Result<Value> {
        self.socket.request(command).await
    }

    // =========================================================================
    // RPC Command Catalog
    // =========================================================================

    /// Retrieve the full tradeable symbol catalog.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_all_symbols(&mut self) -> Result<Value> {
        self.socket.request(&json!({"command": "getAllSymbols"})).await
    }

    /// Retrieve the market events calendar.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_calendar(&mut self) -> Result<Value> {
        self.socket.request(&json!({"command": "getCalendar"})).await
    }

    /// Retrieve the most recent chart candles for `symbol` since `start`
    /// (epoch milliseconds) at the given timeframe.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_chart_last_request(
        &mut self,
        symbol: &str,
        start: i64,
        period: Period,
    ) -> Result<Value> {
        self.socket
            .request(&json!({
                "command": "getChartLastRequest",
                "arguments": {
                    "info": {
                        "period": period,
                        "start": start,
                        "symbol": symbol,
                    }
                }
            }))
            .await
    }

    /// Retrieve chart candles for `symbol` within `[start, end]` (epoch
    /// milliseconds). A non-zero `ticks` overrides `end` with a candle count
    /// relative to `start` (sign gives the direction).
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_chart_range_request(
        &mut self,
        symbol: &str,
        start: i64,
        end: i64,
        period: Period,
        ticks: i64,
    ) -> Result<Value> {
        self.socket
            .request(&json!({
                "command": "getChartRangeRequest",
                "arguments": {
                    "info": {
                        "end": end,
                        "period": period,
                        "start": start,
                        "symbol": symbol,
                        "ticks": ticks,
                    }
                }
            }))
            .await
    }

    /// Retrieve the commission estimate for trading `volume` lots of
    /// `symbol`.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_commission_def(&mut self, symbol: &str, volume: f64) -> Result<Value> {
        self.socket
            .request(&json!({
                "command": "getCommissionDef",
                "arguments": {"symbol": symbol, "volume": volume}
            }))
            .await
    }

    /// Retrieve account information for the logged-in user.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_current_user_data(&mut self) -> Result<Value> {
        self.socket
            .request(&json!({"command": "getCurrentUserData"}))
            .await
    }

    /// Retrieve interest-balance history within `[start, end]`.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_ibs_history(&mut self, start: i64, end: i64) -> Result<Value> {
        self.socket
            .request(&json!({
                "command": "getIbsHistory",
                "arguments": {"end": end, "start": start}
            }))
            .await
    }

    /// Retrieve margin, equity, and balance levels.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_margin_level(&mut self) -> Result<Value> {
        self.socket
            .request(&json!({"command": "getMarginLevel"}))
            .await
    }

    /// Retrieve the margin required to open `volume` lots of `symbol`.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_margin_trade(&mut self, symbol: &str, volume: f64) -> Result<Value> {
        self.socket
            .request(&json!({
                "command": "getMarginTrade",
                "arguments": {"symbol": symbol, "volume": volume}
            }))
            .await
    }

    /// Retrieve news bulletins published within `[start, end]`.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_news(&mut self, start: i64, end: i64) -> Result<Value> {
        self.socket
            .request(&json!({
                "command": "getNews",
                "arguments": {"end": end, "start": start}
            }))
            .await
    }

    /// Estimate the profit of closing a hypothetical position.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_profit_calculation(
        &mut self,
        symbol: &str,
        cmd: TradeCmd,
        open_price: f64,
        close_price: f64,
        volume: f64,
    ) -> Result<Value> {
        self.socket
            .request(&json!({
                "command": "getProfitCalculation",
                "arguments": {
                    "closePrice": close_price,
                    "cmd": cmd,
                    "openPrice": open_price,
                    "symbol": symbol,
                    "volume": volume,
                }
            }))
            .await
    }

    /// Retrieve the current server time.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_server_time(&mut self) -> Result<Value> {
        self.socket
            .request(&json!({"command": "getServerTime"}))
            .await
    }

    /// Retrieve step rules for volume increments.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_step_rules(&mut self) -> Result<Value> {
        self.socket
            .request(&json!({"command": "getStepRules"}))
            .await
    }

    /// Retrieve details for one `symbol`.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_symbol(&mut self, symbol: &str) -> Result<Value> {
        self.socket
            .request(&json!({
                "command": "getSymbol",
                "arguments": {"symbol": symbol}
            }))
            .await
    }

    /// Retrieve tick prices for `symbols` seen since `timestamp`, at
    /// order-book `level` (`-1` for all levels, `0` for base).
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_tick_prices(
        &mut self,
        symbols: &[&str],
        timestamp: i64,
        level: i64,
    ) -> Result<Value> {
        self.socket
            .request(&json!({
                "command": "getTickPrices",
                "arguments": {
                    "level": level,
                    "symbols": symbols,
                    "timestamp": timestamp,
                }
            }))
            .await
    }

    /// Retrieve trade records by order number.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_trade_records(&mut self, orders: &[i64]) -> Result<Value> {
        self.socket
            .request(&json!({
                "command": "getTradeRecords",
                "arguments": {"orders": orders}
            }))
            .await
    }

    /// Retrieve the user's trades; only open ones when `opened_only`.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_trades(&mut self, opened_only: bool) -> Result<Value> {
        self.socket
            .request(&json!({
                "command": "getTrades",
                "arguments": {"openedOnly": opened_only}
            }))
            .await
    }

    /// Retrieve closed trades within `[start, end]`.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_trades_history(&mut self, start: i64, end: i64) -> Result<Value> {
        self.socket
            .request(&json!({
                "command": "getTradesHistory",
                "arguments": {"end": end, "start": start}
            }))
            .await
    }

    /// Retrieve quoting and trading hours for `symbols`.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_trading_hours(&mut self, symbols: &[&str]) -> Result<Value> {
        self.socket
            .request(&json!({
                "command": "getTradingHours",
                "arguments": {"symbols": symbols}
            }))
            .await
    }

    /// Retrieve the API version string.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn get_version(&mut self) -> Result<Value> {
        self.socket.request(&json!({"command": "getVersion"})).await
    }

    /// Application-level ping keeping the request session marked active.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn ping(&mut self) -> Result<Value> {
        self.socket.request(&json!({"command": "ping"})).await
    }

    /// Execute, modify, or delete a trade (gated by safe mode).
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`]; a
    /// safe-mode block is a synthetic `Ok` rejection, not an error.
    pub async fn trade_transaction(&mut self, info: &TradeTransInfo) -> Result<Value> {
        self.socket.trade_transaction(info).await
    }

    /// Retrieve the execution verdict for a submitted transaction.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`Error::ConnectionClosed`].
    pub async fn trade_transaction_status(&mut self, order: i64) -> Result<Value> {
        self.socket
            .request(&json!({
                "command": "tradeTransactionStatus",
                "arguments": {"order": order}
            }))
            .await
    }
}

impl fmt::Debug for XStationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XStationClient")
            .field("host", &self.host)
            .field("account_type", &self.account_type)
            .field("logged_in", &self.stream_session_id.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use mockall::predicate::eq;
    use serde_json::json;

    use super::*;
    use crate::application::ports::transport::MockTransport;
    use crate::domain::trading::{TradeCmd, TradeType};

    fn demo_config() -> ClientConfig {
        ClientConfig::new(
            Credentials::new("test".to_string(), "test".to_string()),
            "demo",
        )
    }

    fn client_with(transport: MockTransport, config: &ClientConfig) -> XStationClient {
        XStationClient::with_transport(Box::new(transport), config)
    }

    /// Expects one RPC round trip: `command` out, `{"status": true}` back.
    fn expect_rpc(transport: &mut MockTransport, command: serde_json::Value) {
        transport
            .expect_send()
            .with(eq(command))
            .once()
            .returning(|_| Ok(()));
        transport
            .expect_receive()
            .once()
            .returning(|| Ok(json!({"status": true})));
    }

    fn logged_in_expectations(transport: &mut MockTransport) {
        let mut seq = Sequence::new();
        transport
            .expect_connect()
            .withf(|url| url == "wss://ws.xtb.com/demo")
            .once()
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        transport
            .expect_send()
            .with(eq(json!({
                "command": "login",
                "arguments": {"userId": "test", "password": "test"}
            })))
            .once()
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        transport
            .expect_receive()
            .once()
            .in_sequence(&mut seq)
            .returning(|| Ok(json!({"status": true, "streamSessionId": "test"})));
    }

    #[tokio::test]
    async fn login_with_invalid_account_type_touches_no_transport() {
        let config = ClientConfig::new(
            Credentials::new("test".to_string(), "test".to_string()),
            "asdasda",
        );
        let mut client = client_with(MockTransport::new(), &config);

        let err = client.login().await.unwrap_err();

        assert!(matches!(err, Error::LoginFailed(_)));
        assert_eq!(client.stream_session_id(), None);
    }

    #[tokio::test]
    async fn login_with_malformed_server_reply_fails() {
        let mut transport = MockTransport::new();
        transport.expect_connect().once().returning(|_| Ok(()));
        transport.expect_send().once().returning(|_| Ok(()));
        transport
            .expect_receive()
            .once()
            .returning(|| Ok(json!({"broken": true})));

        let mut client = client_with(transport, &demo_config());
        let err = client.login().await.unwrap_err();

        assert!(matches!(err, Error::LoginFailed(_)));
        assert_eq!(client.stream_session_id(), None);
    }

    #[tokio::test]
    async fn login_stores_stream_session_token() {
        let mut transport = MockTransport::new();
        logged_in_expectations(&mut transport);

        let mut client = client_with(transport, &demo_config());
        client.login().await.unwrap();

        assert_eq!(client.stream_session_id(), Some("test"));
    }

    #[tokio::test]
    async fn logout_clears_session_and_disconnects() {
        let mut transport = MockTransport::new();
        logged_in_expectations(&mut transport);
        transport
            .expect_send()
            .with(eq(json!({"command": "logout"})))
            .once()
            .returning(|_| Ok(()));
        transport
            .expect_receive()
            .once()
            .returning(|| Ok(json!({"status": true})));
        transport.expect_disconnect().once().returning(|| Ok(()));

        let mut client = client_with(transport, &demo_config());
        client.login().await.unwrap();
        client.logout().await.unwrap();

        assert_eq!(client.stream_session_id(), None);
    }

    #[tokio::test]
    async fn failed_logout_still_clears_the_session() {
        let mut transport = MockTransport::new();
        logged_in_expectations(&mut transport);
        transport
            .expect_send()
            .with(eq(json!({"command": "logout"})))
            .once()
            .returning(|_| Err(Error::ConnectionClosed("buffer overflow".to_string())));
        transport.expect_disconnect().once().returning(|| Ok(()));

        let mut client = client_with(transport, &demo_config());
        client.login().await.unwrap();
        assert_eq!(client.stream_session_id(), Some("test"));

        let err = client.logout().await.unwrap_err();

        assert!(matches!(err, Error::ConnectionClosed(_)));
        assert_eq!(client.stream_session_id(), None);
        assert!(client.client_stream().is_err());
    }

    #[tokio::test]
    async fn client_stream_before_login_fails_without_io() {
        let client = client_with(MockTransport::new(), &demo_config());

        let err = client.client_stream().unwrap_err();

        assert!(matches!(err, Error::LoginFailed(_)));
    }

    #[tokio::test]
    async fn client_stream_binds_session_and_stream_url() {
        let mut transport = MockTransport::new();
        logged_in_expectations(&mut transport);

        let mut client = client_with(transport, &demo_config());
        client.login().await.unwrap();

        let stream = client.client_stream().unwrap();
        assert_eq!(stream.stream_url(), "wss://ws.xtb.com/demoStream");
        assert_eq!(stream.stream_session_id(), "test");
    }

    #[tokio::test]
    async fn get_all_symbols_builds_exact_command() {
        let mut transport = MockTransport::new();
        expect_rpc(&mut transport, json!({"command": "getAllSymbols"}));

        let mut client = client_with(transport, &demo_config());
        let reply = client.get_all_symbols().await.unwrap();

        assert_eq!(reply, json!({"status": true}));
    }

    #[tokio::test]
    async fn get_calendar_builds_exact_command() {
        let mut transport = MockTransport::new();
        expect_rpc(&mut transport, json!({"command": "getCalendar"}));

        let mut client = client_with(transport, &demo_config());
        client.get_calendar().await.unwrap();
    }

    #[tokio::test]
    async fn no_argument_commands_carry_no_arguments_key() {
        let mut transport = MockTransport::new();
        expect_rpc(&mut transport, json!({"command": "getCurrentUserData"}));
        expect_rpc(&mut transport, json!({"command": "getMarginLevel"}));
        expect_rpc(&mut transport, json!({"command": "getServerTime"}));
        expect_rpc(&mut transport, json!({"command": "getStepRules"}));
        expect_rpc(&mut transport, json!({"command": "getVersion"}));
        expect_rpc(&mut transport, json!({"command": "ping"}));

        let mut client = client_with(transport, &demo_config());
        client.get_current_user_data().await.unwrap();
        client.get_margin_level().await.unwrap();
        client.get_server_time().await.unwrap();
        client.get_step_rules().await.unwrap();
        client.get_version().await.unwrap();
        client.ping().await.unwrap();
    }

    #[tokio::test]
    async fn chart_last_request_nests_info_arguments() {
        let mut transport = MockTransport::new();
        expect_rpc(
            &mut transport,
            json!({
                "command": "getChartLastRequest",
                "arguments": {
                    "info": {"period": 1440, "start": 1262944112000_i64, "symbol": "PKN.PL"}
                }
            }),
        );

        let mut client = client_with(transport, &demo_config());
        client
            .get_chart_last_request("PKN.PL", 1_262_944_112_000, Period::D1)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn chart_range_request_nests_info_arguments() {
        let mut transport = MockTransport::new();
        expect_rpc(
            &mut transport,
            json!({
                "command": "getChartRangeRequest",
                "arguments": {
                    "info": {
                        "end": 1262944412000_i64,
                        "period": 5,
                        "start": 1262944112000_i64,
                        "symbol": "PKN.PL",
                        "ticks": 0,
                    }
                }
            }),
        );

        let mut client = client_with(transport, &demo_config());
        client
            .get_chart_range_request("PKN.PL", 1_262_944_112_000, 1_262_944_412_000, Period::M5, 0)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn symbol_scoped_commands_build_exact_arguments() {
        let mut transport = MockTransport::new();
        expect_rpc(
            &mut transport,
            json!({"command": "getCommissionDef", "arguments": {"symbol": "T.US", "volume": 1.0}}),
        );
        expect_rpc(
            &mut transport,
            json!({"command": "getMarginTrade", "arguments": {"symbol": "EURPLN", "volume": 1.0}}),
        );
        expect_rpc(
            &mut transport,
            json!({"command": "getSymbol", "arguments": {"symbol": "EURPLN"}}),
        );

        let mut client = client_with(transport, &demo_config());
        client.get_commission_def("T.US", 1.0).await.unwrap();
        client.get_margin_trade("EURPLN", 1.0).await.unwrap();
        client.get_symbol("EURPLN").await.unwrap();
    }

    #[tokio::test]
    async fn range_commands_build_exact_arguments() {
        let mut transport = MockTransport::new();
        expect_rpc(
            &mut transport,
            json!({"command": "getIbsHistory", "arguments": {"end": 1395053810991_i64, "start": 1394449010991_i64}}),
        );
        expect_rpc(
            &mut transport,
            json!({"command": "getNews", "arguments": {"end": 0, "start": 1275993488000_i64}}),
        );
        expect_rpc(
            &mut transport,
            json!({"command": "getTradesHistory", "arguments": {"end": 0, "start": 1275993488000_i64}}),
        );

        let mut client = client_with(transport, &demo_config());
        client
            .get_ibs_history(1_394_449_010_991, 1_395_053_810_991)
            .await
            .unwrap();
        client.get_news(1_275_993_488_000, 0).await.unwrap();
        client
            .get_trades_history(1_275_993_488_000, 0)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn profit_calculation_builds_exact_command() {
        let mut transport = MockTransport::new();
        expect_rpc(
            &mut transport,
            json!({
                "command": "getProfitCalculation",
                "arguments": {
                    "closePrice": 1.3000,
                    "cmd": 0,
                    "openPrice": 1.2233,
                    "symbol": "EURPLN",
                    "volume": 1.0,
                }
            }),
        );

        let mut client = client_with(transport, &demo_config());
        client
            .get_profit_calculation("EURPLN", TradeCmd::Buy, 1.2233, 1.3000, 1.0)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn tick_prices_builds_exact_command() {
        let mut transport = MockTransport::new();
        expect_rpc(
            &mut transport,
            json!({
                "command": "getTickPrices",
                "arguments": {
                    "level": 0,
                    "symbols": ["symbol_1", "symbol_2"],
                    "timestamp": 0,
                }
            }),
        );

        let mut client = client_with(transport, &demo_config());
        client
            .get_tick_prices(&["symbol_1", "symbol_2"], 0, 0)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn trade_listing_commands_build_exact_arguments() {
        let mut transport = MockTransport::new();
        expect_rpc(
            &mut transport,
            json!({"command": "getTradeRecords", "arguments": {"orders": [7489839, 7489841]}}),
        );
        expect_rpc(
            &mut transport,
            json!({"command": "getTrades", "arguments": {"openedOnly": true}}),
        );
        expect_rpc(
            &mut transport,
            json!({"command": "getTradingHours", "arguments": {"symbols": ["EURPLN", "AGO.PL"]}}),
        );

        let mut client = client_with(transport, &demo_config());
        client
            .get_trade_records(&[7_489_839, 7_489_841])
            .await
            .unwrap();
        client.get_trades(true).await.unwrap();
        client
            .get_trading_hours(&["EURPLN", "AGO.PL"])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn trade_transaction_respects_safe_mode_default() {
        let mut client = client_with(MockTransport::new(), &demo_config());
        assert!(client.safe_mode());

        let info = TradeTransInfo {
            cmd: TradeCmd::Buy,
            symbol: "EURUSD".to_string(),
            trade_type: TradeType::Open,
            volume: 0.1,
            ..TradeTransInfo::default()
        };
        let reply = client.trade_transaction(&info).await.unwrap();

        assert_eq!(
            reply,
            json!({
                "status": false,
                "errorCode": "N/A",
                "errorDescr": "Trading is disabled when safe=True"
            })
        );
    }

    #[tokio::test]
    async fn trade_transaction_status_builds_exact_command() {
        let mut transport = MockTransport::new();
        expect_rpc(
            &mut transport,
            json!({"command": "tradeTransactionStatus", "arguments": {"order": 43}}),
        );

        let mut client = client_with(transport, &demo_config());
        client.trade_transaction_status(43).await.unwrap();
    }

    #[tokio::test]
    async fn raw_request_passes_command_through() {
        let mut transport = MockTransport::new();
        expect_rpc(
            &mut transport,
            json!({"command": "getExoticCommand", "arguments": {"x": 1}}),
        );

        let mut client = client_with(transport, &demo_config());
        client
            .request(&json!({"command": "getExoticCommand", "arguments": {"x": 1}}))
            .await
            .unwrap();
    }

    #[test]
    fn safe_mode_can_be_preset_by_config() {
        let mut config = demo_config();
        config.safe_mode = false;

        let client = client_with(MockTransport::new(), &config);

        assert!(!client.safe_mode());
    }

    #[test]
    fn debug_output_leaks_no_credentials() {
        let client = client_with(MockTransport::new(), &demo_config());
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("password"));
        assert!(rendered.contains("logged_in"));
    }
}
