//! Account Endpoints
//!
//! Server selection for the `xStation5` API: account categories, login
//! credentials, and the request/stream endpoint URLs derived from them.

use std::fmt;
use std::str::FromStr;

use super::error::Error;

/// Production host serving both `xStation5` endpoints.
pub const DEFAULT_HOST: &str = "ws.xtb.com";

// =============================================================================
// Account Type
// =============================================================================

/// Account category selecting which `xStation5` server handles the session.
///
/// The category is the final path segment of both endpoint URLs:
/// `wss://ws.xtb.com/real` for requests and `wss://ws.xtb.com/realStream`
/// for subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    /// Practice account with simulated funds.
    Demo,
    /// Real-money account.
    Real,
}

impl AccountType {
    /// All supported account categories.
    pub const ALL: [Self; 2] = [Self::Demo, Self::Real];

    /// Path segment used in endpoint URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Real => "real",
        }
    }

    /// Request (RPC) endpoint URL on the given host.
    #[must_use]
    pub fn request_url(self, host: &str) -> String {
        format!("{}/{}", normalize_host(host), self.as_str())
    }

    /// Streaming endpoint URL on the given host.
    #[must_use]
    pub fn stream_url(self, host: &str) -> String {
        format!("{}/{}Stream", normalize_host(host), self.as_str())
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = Error;

    /// Matches the exact lowercase category names.
    ///
    /// Anything else fails with [`Error::LoginFailed`] so an unknown category
    /// is rejected before any connection is attempted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "demo" => Ok(Self::Demo),
            "real" => Ok(Self::Real),
            other => Err(Error::LoginFailed(format!(
                "unknown account type '{other}', expected one of: demo, real"
            ))),
        }
    }
}

/// Normalize a host into a WebSocket origin.
///
/// Bare hostnames get a `wss://` prefix; values already carrying a `ws://`
/// or `wss://` scheme pass through unchanged. Plain `ws://` is accepted so
/// local test servers can be targeted without TLS.
#[must_use]
pub fn normalize_host(host: &str) -> String {
    if host.starts_with("wss://") || host.starts_with("ws://") {
        host.to_string()
    } else {
        format!("wss://{host}")
    }
}

// =============================================================================
// Credentials
// =============================================================================

/// Login credentials for an `xStation5` account.
///
/// The `Debug` implementation redacts both fields so credentials never leak
/// into logs.
#[derive(Clone)]
pub struct Credentials {
    account_id: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(account_id: String, password: String) -> Self {
        Self {
            account_id,
            password,
        }
    }

    /// Account identifier sent as `userId` in the login command.
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Account password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;

    #[test_case("demo", AccountType::Demo; "demo account")]
    #[test_case("real", AccountType::Real; "real account")]
    fn parses_known_account_types(input: &str, expected: AccountType) {
        assert_eq!(input.parse::<AccountType>().unwrap(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("Demo"; "wrong case")]
    #[test_case("asdasda"; "garbage")]
    #[test_case("demoStream"; "stream suffix")]
    fn rejects_unknown_account_types(input: &str) {
        let err = input.parse::<AccountType>().unwrap_err();
        assert!(matches!(err, Error::LoginFailed(_)));
    }

    #[test]
    fn builds_production_urls() {
        assert_eq!(
            AccountType::Demo.request_url(DEFAULT_HOST),
            "wss://ws.xtb.com/demo"
        );
        assert_eq!(
            AccountType::Real.stream_url(DEFAULT_HOST),
            "wss://ws.xtb.com/realStream"
        );
    }

    #[test]
    fn keeps_explicit_plain_ws_scheme() {
        assert_eq!(
            AccountType::Demo.request_url("ws://127.0.0.1:4100"),
            "ws://127.0.0.1:4100/demo"
        );
        assert_eq!(
            AccountType::Demo.stream_url("ws://127.0.0.1:4100"),
            "ws://127.0.0.1:4100/demoStream"
        );
    }

    #[test_case("ws.xtb.com", "wss://ws.xtb.com"; "bare host")]
    #[test_case("wss://ws.xtb.com", "wss://ws.xtb.com"; "already secure")]
    #[test_case("ws://localhost:9000", "ws://localhost:9000"; "already plain")]
    fn normalizes_hosts(input: &str, expected: &str) {
        assert_eq!(normalize_host(input), expected);
    }

    #[test]
    fn debug_redacts_credentials() {
        let credentials = Credentials::new("10000".to_string(), "hunter2".to_string());
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("10000"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn accessors_return_original_values() {
        let credentials = Credentials::new("10000".to_string(), "hunter2".to_string());
        assert_eq!(credentials.account_id(), "10000");
        assert_eq!(credentials.password(), "hunter2");
    }

    proptest! {
        #[test]
        fn normalized_host_always_has_ws_scheme(host in "[a-z0-9.:/-]{0,40}") {
            let normalized = normalize_host(&host);
            prop_assert!(normalized.starts_with("wss://") || normalized.starts_with("ws://"));
        }

        #[test]
        fn normalization_is_idempotent(host in "[a-z0-9.:/-]{0,40}") {
            let once = normalize_host(&host);
            prop_assert_eq!(normalize_host(&once), once);
        }
    }
}
