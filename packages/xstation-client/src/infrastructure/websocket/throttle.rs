//! Request Throttle
//!
//! Paces outbound frames to the minimum spacing the server tolerates on one
//! connection. Sends that arrive faster wait their turn instead of failing.

use std::time::Duration;

use tokio::time::Instant;

/// Enforces at most one send per `interval`.
#[derive(Debug)]
pub(super) struct Throttle {
    interval: Duration,
    last_send: Option<Instant>,
}

impl Throttle {
    pub(super) const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_send: None,
        }
    }

    /// Wait until the spacing since the previous send has elapsed.
    pub(super) async fn acquire(&mut self) {
        if let Some(last) = self.last_send {
            tokio::time::sleep_until(last + self.interval).await;
        }
    }

    /// Record the moment a send went out.
    pub(super) fn mark(&mut self) {
        self.last_send = Some(Instant::now());
    }
}
