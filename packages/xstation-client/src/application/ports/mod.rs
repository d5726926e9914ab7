//! Port Interfaces
//!
//! Defines the interfaces (ports) for external systems following
//! the Hexagonal Architecture pattern. These are the contracts that
//! infrastructure adapters must implement.
//!
//! ## Driven Ports (Outbound)
//!
//! - [`Transport`]: message-oriented connection to an `xStation5` endpoint

/// Wire transport abstraction.
pub mod transport;

pub use transport::Transport;
