//! Response Envelope Helpers
//!
//! Free functions for picking apart the JSON envelopes the `xStation5` API
//! wraps around every reply and stream push. Replies stay raw
//! [`serde_json::Value`]s end to end; these helpers only read the envelope
//! fields that session management depends on.

use serde_json::{Value, json};

/// Whether a reply reports success (`"status": true`).
///
/// A missing or non-boolean `status` counts as failure.
#[must_use]
pub fn is_status_ok(reply: &Value) -> bool {
    reply.get("status").and_then(Value::as_bool).unwrap_or(false)
}

/// Stream session token carried by a successful login reply.
#[must_use]
pub fn stream_session_id(reply: &Value) -> Option<&str> {
    reply.get("streamSessionId").and_then(Value::as_str)
}

/// Discriminator naming the payload type of a stream push.
#[must_use]
pub fn command(frame: &Value) -> Option<&str> {
    frame.get("command").and_then(Value::as_str)
}

/// Payload object of a stream push.
#[must_use]
pub fn data(frame: &Value) -> Option<&Value> {
    frame.get("data")
}

/// Synthetic rejection returned in place of a trade request while safe mode
/// is enabled.
///
/// The shape mirrors a genuine server rejection so callers can branch on
/// `status` without special-casing safe mode.
#[must_use]
pub fn safe_mode_rejection() -> Value {
    json!({
        "status": false,
        "errorCode": "N/A",
        "errorDescr": "Trading is disabled when safe=True"
    })
}
