use chrono::Local;
use log::debug;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use super::api::ApiClient;
use crate::state::Action;

/// Running poll loop. Dropping it (or calling [`PollHandle::stop`]) stops the
/// repeating trigger; requests already in flight still deliver their result.
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Fetch the timer list every `period`, reporting each outcome on `tx`.
///
/// The first fetch happens one period after the call. Every fetch runs in
/// its own task, so a slow response never delays the next tick; responses
/// are delivered in whatever order they complete.
pub fn spawn_poller(client: ApiClient, period: Duration, tx: UnboundedSender<Action>) -> PollHandle {
    let task = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        loop {
            ticker.tick().await;
            if tx.is_closed() {
                break;
            }

            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let action = poll_once(&client).await;
                // Receiver gone means the dashboard has exited.
                let _ = tx.send(action);
            });
        }
    });

    PollHandle { task }
}

/// One fetch, turned into the action the dashboard applies.
pub async fn poll_once(client: &ApiClient) -> Action {
    match client.fetch_current_timers().await {
        Ok(timers) => Action::PollSucceeded {
            timers,
            received_at: Local::now(),
        },
        Err(e) => {
            debug!("Timer poll failed: {}", e);
            Action::PollFailed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_unreachable_api_reports_failures_repeatedly() {
        // Port 9 (discard) on localhost is not expected to speak HTTP.
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_poller(client, Duration::from_millis(20), tx);

        for _ in 0..2 {
            let action = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .unwrap()
                .unwrap();
            assert!(matches!(action, Action::PollFailed(_)));
        }

        handle.stop();
    }
}
