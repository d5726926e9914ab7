//! Stream live candles for a symbol.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example stream_candles -- EURUSD
//! ```
//!
//! Candles close once a minute, so expect a quiet start; the keep-alive
//! subscription keeps the channel warm in between.
//!
//! # Environment Variables
//!
//! ## Required
//! - `XSTATION_ACCOUNT_ID`: Account number
//! - `XSTATION_PASSWORD`: Account password
//!
//! ## Optional
//! - `XSTATION_ACCOUNT_TYPE`: "demo" | "real" (default: demo)
//! - `RUST_LOG`: Log level (default: off)

use xstation_client::domain::protocol;
use xstation_client::{ClientConfig, XStationClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("rustls crypto provider already installed"))?;
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("xstation_client=info".parse()?),
        )
        .init();

    let symbol = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "EURUSD".to_string());

    let config = ClientConfig::from_env()?;
    let mut client = XStationClient::from_config(&config);
    client.login().await?;

    let mut stream = client.client_stream()?;
    stream.open().await?;
    stream.subscribe_keep_alive().await?;
    stream.subscribe_candles(&symbol).await?;
    println!("waiting for {symbol} candles (one per minute)...");

    let mut seen = 0;
    while seen < 3 {
        let push = stream.listen().await?;
        match protocol::command(&push) {
            Some("candle") => {
                let Some(data) = protocol::data(&push) else {
                    continue;
                };
                let stamp = data["ctm"]
                    .as_i64()
                    .and_then(chrono::DateTime::from_timestamp_millis)
                    .map_or_else(|| "?".to_string(), |t| t.to_rfc3339());
                println!(
                    "{stamp} {} open={} close={}",
                    data["symbol"], data["open"], data["close"]
                );
                seen += 1;
            }
            Some("keepAlive") => tracing::debug!("keep-alive push"),
            other => tracing::debug!(command = ?other, "unhandled push"),
        }
    }

    stream.stop_candles(&symbol).await?;
    stream.stop_keep_alive().await?;
    stream.close().await?;
    client.logout().await?;
    Ok(())
}
