//! Submit a market buy order.
//!
//! Safe mode is on by default, so running this prints the synthetic
//! rejection instead of trading. Set `XSTATION_SAFE_MODE=0` only against a
//! demo account you are happy to trade on.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example trade_transaction
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `XSTATION_ACCOUNT_ID`: Account number
//! - `XSTATION_PASSWORD`: Account password
//!
//! ## Optional
//! - `XSTATION_ACCOUNT_TYPE`: "demo" | "real" (default: demo)
//! - `XSTATION_SAFE_MODE`: "1" blocks trades, "0" sends them (default: 1)
//! - `RUST_LOG`: Log level (default: off)

use xstation_client::{ClientConfig, TradeCmd, TradeTransInfo, TradeType, XStationClient};

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

    let config = ClientConfig::from_env()?;
    let mut client = XStationClient::from_config(&config);
    client.login().await?;

    let info = TradeTransInfo {
        cmd: TradeCmd::Buy,
        symbol: "EURUSD".to_string(),
        trade_type: TradeType::Open,
        volume: 0.01,
        price: 1.05,
        custom_comment: "xstation-client demo order".to_string(),
        ..TradeTransInfo::default()
    };

    let reply = client.trade_transaction(&info).await?;
    println!("{reply}");

    if client.safe_mode() {
        println!("safe mode is on; set XSTATION_SAFE_MODE=0 to send real orders");
    } else if let Some(order) = reply["returnData"]["order"].as_i64() {
        let verdict = client.trade_transaction_status(order).await?;
        println!("verdict: {verdict}");
    }

    client.logout().await?;
    Ok(())
}
