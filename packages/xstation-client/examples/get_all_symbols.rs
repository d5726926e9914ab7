//! Fetch the tradeable symbol catalog.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example get_all_symbols
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
//! - `RUST_LOG`: Log level (default: off)

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

    let config = ClientConfig::from_env()?;
    let mut client = XStationClient::from_config(&config);

    client.login().await?;

    let symbols = client.get_all_symbols().await?;
    let catalog = symbols["returnData"].as_array();
    println!("{} tradeable symbols", catalog.map_or(0, Vec::len));
    if let Some(first) = catalog.and_then(|entries| entries.first()) {
        println!("first: {} ({})", first["symbol"], first["description"]);
    }

    client.logout().await?;
    Ok(())
}
