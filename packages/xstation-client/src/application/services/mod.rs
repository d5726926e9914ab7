//! Application Services
//!
//! Services that orchestrate the protocol over the transport ports.
//!
//! - [`XStationClient`]: Session lifecycle and the typed RPC catalog
//! - [`Socket`]: Request/reply channel with the safe-mode trade gate
//! - [`ClientStream`]: Subscription channel for server pushes

pub mod client;
pub mod socket;
pub mod stream;

pub use client::XStationClient;
pub use socket::Socket;
pub use stream::ClientStream;
