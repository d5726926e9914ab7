//! Configuration Module
//!
//! Configuration loading for the client and its transport.

mod settings;

pub use settings::{ClientConfig, ConfigError, TransportSettings};
