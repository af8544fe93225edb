use crate::models::{Config, TimerIdentity, TimerSnapshot, TimerState};
use crate::utils::LocalStore;
use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test utilities for setting up isolated test environments
pub struct TestContext {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
    pub store: LocalStore,
}

impl TestContext {
    /// Create a new isolated test context with its own store and config file
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        let store = LocalStore::new(temp_dir.path().join("store"));

        Ok(Self {
            temp_dir,
            config_path,
            store,
        })
    }

    /// Config pointing at `api_url`, with a fast poll interval for tests
    pub fn config_for(&self, api_url: &str) -> Config {
        Config {
            api_url: api_url.to_string(),
            poll_interval_ms: 25,
            ..Config::default()
        }
    }
}

/// Build a timer snapshot the way the API would report it
pub fn sample_timer(index: u32, name: &str, time: &str, state: TimerState) -> TimerSnapshot {
    TimerSnapshot {
        id: TimerIdentity {
            uuid: format!("00000000-0000-0000-0000-{:012}", index),
            name: name.to_string(),
            index,
        },
        time: time.to_string(),
        state,
        allows_overrun: true,
    }
}

/// The four timers a typical service setup reports
pub fn service_timers() -> Vec<TimerSnapshot> {
    vec![
        sample_timer(0, "Countdown Ibadah", "00:05:00", TimerState::Running),
        sample_timer(1, "PAW", "00:03:00", TimerState::Stopped),
        sample_timer(2, "Khotbah", "00:10:00", TimerState::Stopped),
        sample_timer(3, "Ministry Time", "00:00:00", TimerState::Overran),
    ]
}

/// Helper for async tests with an isolated context
pub async fn with_test_context_async<F, Fut>(test_fn: F)
where
    F: FnOnce(TestContext) -> Fut,
    Fut: std::future::Future<Output = Result<()>>,
{
    let ctx = TestContext::new().expect("Failed to create test context");
    test_fn(ctx).await.expect("Async test function failed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let ctx = TestContext::new().unwrap();
        assert!(ctx.temp_dir.path().exists());
        assert!(!ctx.config_path.exists());
        assert!(ctx.config_for("http://127.0.0.1:1").validate().is_ok());
    }

    #[test]
    fn test_service_timers_have_distinct_slots() {
        let timers = service_timers();
        let mut uuids: Vec<_> = timers.iter().map(|t| t.id.uuid.clone()).collect();
        uuids.dedup();
        assert_eq!(uuids.len(), 4);
        assert!(timers.iter().enumerate().all(|(i, t)| t.index() as usize == i));
    }

    #[tokio::test]
    async fn test_with_test_context_async() {
        with_test_context_async(|ctx| async move {
            ctx.store.set("visibleTimers", "{}")?;
            assert_eq!(ctx.store.get("visibleTimers")?.as_deref(), Some("{}"));
            Ok(())
        })
        .await;
    }
}
