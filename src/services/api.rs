//! HTTP client for the presentation software's timer API.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::{TimerIdentity, TimerSnapshot};
use crate::utils::duration::parse_duration_string;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{context} ({status})")]
    Status {
        context: &'static str,
        status: StatusCode,
    },

    #[error("Failed to decode timer list: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The three control endpoints under `/v1/timer/{index}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Start,
    Stop,
    Reset,
}

impl ControlAction {
    pub fn path_segment(&self) -> &'static str {
        match self {
            ControlAction::Start => "start",
            ControlAction::Stop => "stop",
            ControlAction::Reset => "reset",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            ControlAction::Start => "Failed to start timer",
            ControlAction::Stop => "Failed to stop timer",
            ControlAction::Reset => "Failed to update timer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub duration: i64,
}

/// Body shared by start, stop and reset. Overrun is always allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRequest {
    pub id: TimerIdentity,
    pub allows_overrun: bool,
    pub countdown: Countdown,
}

impl ControlRequest {
    pub fn new(id: &TimerIdentity, duration: i64) -> Self {
        Self {
            id: id.clone(),
            allows_overrun: true,
            countdown: Countdown { duration },
        }
    }

    /// Request carrying the duration currently displayed on `timer`.
    pub fn for_displayed_time(timer: &TimerSnapshot) -> Self {
        Self::new(&timer.id, parse_duration_string(&timer.time))
    }
}

/// Upper bound on one request, so an API that accepts but never answers
/// surfaces as a transport failure.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = crate::utils::validation::validate_api_url(base_url)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_current_timers(&self) -> Result<Vec<TimerSnapshot>, ApiError> {
        let url = format!("{}/v1/timers/current", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("chunked", "false")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                context: "Failed to fetch",
                status: response.status(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn send_control(&self, action: ControlAction, request: &ControlRequest) -> Result<(), ApiError> {
        let url = format!(
            "{}/v1/timer/{}/{}",
            self.base_url,
            request.id.index,
            action.path_segment()
        );
        log::debug!("PUT {} duration={}", url, request.countdown.duration);

        let response = self.http.put(&url).json(request).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                context: action.failure_message(),
                status: response.status(),
            });
        }
        Ok(())
    }

    pub async fn start_timer(&self, timer: &TimerSnapshot) -> Result<(), ApiError> {
        self.send_control(ControlAction::Start, &ControlRequest::for_displayed_time(timer))
            .await
    }

    /// The API ignores the duration on stop but expects the same body shape.
    pub async fn stop_timer(&self, timer: &TimerSnapshot) -> Result<(), ApiError> {
        self.send_control(ControlAction::Stop, &ControlRequest::for_displayed_time(timer))
            .await
    }

    pub async fn update_duration(&self, id: &TimerIdentity, duration: i64) -> Result<(), ApiError> {
        self.send_control(ControlAction::Reset, &ControlRequest::new(id, duration))
            .await
    }
}
