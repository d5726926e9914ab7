//! Client Error Types
//!
//! The `xStation5` API surfaces exactly two failure classes to callers:
//! transport problems and login rejections. Every lower-level failure
//! (DNS, TLS, timeouts, peer closes, malformed frames) is folded into
//! [`Error::ConnectionClosed`] so call sites handle one transport error
//! instead of a taxonomy of them.

/// Convenience alias for results returned by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by session and transport operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The connection failed, was closed, or was never established.
    ///
    /// Carries a human-readable description of the underlying failure.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// Login was rejected before or after reaching the server.
    ///
    /// Carries either a description of the local validation failure or the
    /// serialized server reply that rejected the session.
    #[error("login failed: {0}")]
    LoginFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_closed_display_includes_reason() {
        let err = Error::ConnectionClosed("peer reset".to_string());
        assert_eq!(err.to_string(), "connection closed: peer reset");
    }

    #[test]
    fn login_failed_display_includes_server_reply() {
        let err = Error::LoginFailed(r#"{"status":false}"#.to_string());
        assert_eq!(err.to_string(), r#"login failed: {"status":false}"#);
    }
}
