//! Application Layer - Use cases and port definitions.
//!
//! This layer contains the session services and the transport port they
//! drive. Nothing here touches sockets directly.

/// Port interfaces for external systems (WebSocket transport).
pub mod ports;

/// Session, request, and subscription services.
pub mod services;
