#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! `xStation5` Trading API Client
//!
//! A TLS WebSocket client for the `xStation5` trading API: a throttled
//! request/reply channel for RPC commands, a subscription channel for
//! server pushes, and a safe-mode gate in front of trade execution.
//!
//! # Layers (inside -> outside)
//!
//! - **Domain**: Protocol vocabulary with no I/O dependencies
//!   - `account`: Account types, server URLs, credentials
//!   - `trading`: Trade enums and the transaction payload
//!   - `protocol`: Reply envelope helpers
//!   - `error`: The crate error type
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: The transport interface the services drive
//!   - `services`: Session client, request socket, subscription stream
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `websocket`: tokio-tungstenite transport with throttle + keep-alive
//!   - `config`: Environment-driven configuration
//!
//! # Data Flow
//!
//! ```text
//!                      +-----------------+     +--------------+
//!  XStationClient ---->|     Socket      |---->| WsConnection |====> wss://host/demo
//!    (RPC catalog)     |  (safe mode)    |     +--------------+
//!                      +-----------------+
//!                      +-----------------+     +--------------+
//!  client_stream() --->|  ClientStream   |---->| WsConnection |====> wss://host/demoStream
//!    (subscriptions)   | (session token) |     +--------------+
//!                      +-----------------+
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use xstation_client::{ClientConfig, Credentials, XStationClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new("10000".to_string(), "password".to_string());
//!     let mut client = XStationClient::from_config(&ClientConfig::new(credentials, "demo"));
//!
//!     client.login().await?;
//!
//!     let symbols = client.get_all_symbols().await?;
//!     let count = symbols["returnData"].as_array().map_or(0, Vec::len);
//!     println!("{count} symbols");
//!
//!     let mut stream = client.client_stream()?;
//!     stream.open().await?;
//!     stream.subscribe_candles("EURUSD").await?;
//!     let push = stream.listen().await?;
//!     println!("{push}");
//!     stream.close().await?;
//!
//!     client.logout().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Protocol vocabulary with no I/O dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::account::{AccountType, Credentials, DEFAULT_HOST, normalize_host};
pub use domain::error::{Error, Result};
pub use domain::trading::{Period, TradeCmd, TradeStatus, TradeTransInfo, TradeType};

// Transport port
pub use application::ports::Transport;

// Application services
pub use application::services::stream::{DEFAULT_TICK_MAX_LEVEL, DEFAULT_TICK_MIN_ARRIVAL_TIME};
pub use application::services::{ClientStream, Socket, XStationClient};

// Infrastructure config
pub use infrastructure::config::{ClientConfig, ConfigError, TransportSettings};

// WebSocket transport (for integration tests and custom wiring)
pub use infrastructure::websocket::{ConnectionState, WsConnection};
