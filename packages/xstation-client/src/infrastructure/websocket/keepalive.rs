//! Connection Keep-Alive
//!
//! Background task that pings the server while a connection sits idle, so
//! the session is not reaped by the server-side inactivity timeout.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use futures_util::SinkExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

/// Handle to a running keep-alive task.
///
/// Dropping the handle cancels the task; [`KeepAliveHandle::shutdown`] also
/// waits for it to exit.
#[derive(Debug)]
pub(super) struct KeepAliveHandle {
    cancel: CancellationToken,
    failure: Arc<parking_lot::Mutex<Option<String>>>,
    task: Option<JoinHandle<()>>,
}

impl KeepAliveHandle {
    /// The ping failure that killed the task, if any.
    pub(super) fn failure(&self) -> Option<String> {
        self.failure.lock().clone()
    }

    /// Stop the task and wait for it to exit.
    pub(super) async fn shutdown(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for KeepAliveHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawn a task that pings `sink` every `period` until cancelled.
///
/// A failed ping kills the task; the error is parked in the handle for the
/// owning connection to surface on its next send.
pub(super) fn spawn<S>(sink: Arc<Mutex<S>>, period: Duration) -> KeepAliveHandle
where
    S: SinkExt<Message> + Unpin + Send + 'static,
    S::Error: Display,
{
    let cancel = CancellationToken::new();
    let failure = Arc::new(parking_lot::Mutex::new(None));
    let task = tokio::spawn(run(sink, period, cancel.clone(), Arc::clone(&failure)));
    KeepAliveHandle {
        cancel,
        failure,
        task: Some(task),
    }
}

async fn run<S>(
    sink: Arc<Mutex<S>>,
    period: Duration,
    cancel: CancellationToken,
    failure: Arc<parking_lot::Mutex<Option<String>>>,
) where
    S: SinkExt<Message> + Unpin + Send + 'static,
    S::Error: Display,
{
    // First tick after one full period; the connection was just used.
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!("Keep-alive task cancelled");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = sink.lock().await.send(Message::Ping(vec![].into())).await {
                    tracing::warn!(error = %e, "Keep-alive ping failed");
                    *failure.lock() = Some(format!("keep-alive ping failed: {e}"));
                    break;
                }
                tracing::trace!("Keep-alive ping sent");
            }
        }
    }
}
