use log::warn;
use tokio::sync::mpsc::UnboundedSender;

use super::api::ApiClient;
use crate::models::{TimerIdentity, TimerSnapshot};
use crate::state::{Action, Effect};

/// Sends control commands in the background and reports only failures
/// (and a finished duration update) back to the dashboard. Nothing is
/// retried and nothing is applied locally: the next poll shows the result.
#[derive(Clone)]
pub struct CommandDispatcher {
    client: ApiClient,
    tx: UnboundedSender<Action>,
}

impl CommandDispatcher {
    pub fn new(client: ApiClient, tx: UnboundedSender<Action>) -> Self {
        Self { client, tx }
    }

    /// Carry out a command effect. Store effects are not handled here.
    pub fn dispatch(&self, effect: Effect) {
        match effect {
            Effect::Start(timer) => self.start(timer),
            Effect::Stop(timer) => self.stop(timer),
            Effect::UpdateDuration { id, duration } => self.update_duration(id, duration),
            Effect::PersistVisibility(_) => {}
        }
    }

    pub fn start(&self, timer: TimerSnapshot) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Err(e) = client.start_timer(&timer).await {
                warn!("Error starting timer {}: {}", timer.id.index, e);
                let _ = tx.send(Action::CommandFailed(e.to_string()));
            }
        });
    }

    pub fn stop(&self, timer: TimerSnapshot) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Err(e) = client.stop_timer(&timer).await {
                warn!("Error stopping timer {}: {}", timer.id.index, e);
                let _ = tx.send(Action::CommandFailed(e.to_string()));
            }
        });
    }

    pub fn update_duration(&self, id: TimerIdentity, duration: i64) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = match client.update_duration(&id, duration).await {
                Ok(()) => Action::DurationUpdated(id),
                Err(e) => {
                    warn!("Error updating timer {}: {}", id.index, e);
                    Action::DurationUpdateFailed {
                        message: e.to_string(),
                        id,
                    }
                }
            };
            let _ = tx.send(action);
        });
    }
}
