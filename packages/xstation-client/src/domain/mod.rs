//! Domain Layer - Core protocol types and session rules.
//!
//! This layer contains the `xStation5` protocol vocabulary with no I/O:
//! account endpoints, trading wire codes, and the envelope helpers the
//! session services branch on.

/// Account categories, credentials, and endpoint URLs.
pub mod account;

/// Error types returned by the client.
pub mod error;

/// JSON envelope helpers for replies and stream pushes.
pub mod protocol;

/// Trading wire codes and the trade transaction payload.
pub mod trading;
