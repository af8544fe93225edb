use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use timer_dashboard::cli::commands::{reset_by_index, start_by_index, stop_by_index};
use timer_dashboard::models::{visibility::VISIBILITY_KEY, TimerSnapshot, TimerState, VisibilityPreference};
use timer_dashboard::services::{spawn_poller, ApiClient, CommandDispatcher};
use timer_dashboard::state::{Action, DashboardState, GridContent};
use timer_dashboard::test_utils::{sample_timer, service_timers, with_test_context_async};
use timer_dashboard::ui::Dashboard;
use timer_dashboard::Theme;

#[derive(Debug, Clone)]
struct RecordedRequest {
    path: String,
    query: Option<String>,
    body: Option<Value>,
}

#[derive(Default)]
struct FakeApi {
    timers: Vec<TimerSnapshot>,
    failing: bool,
    requests: Vec<RecordedRequest>,
}

type SharedApi = Arc<Mutex<FakeApi>>;

async fn current_timers(State(api): State<SharedApi>, RawQuery(query): RawQuery) -> Response {
    let mut api = api.lock().unwrap();
    api.requests.push(RecordedRequest {
        path: "/v1/timers/current".to_string(),
        query,
        body: None,
    });
    if api.failing {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    Json(api.timers.clone()).into_response()
}

async fn control(
    State(api): State<SharedApi>,
    Path((index, action)): Path<(u32, String)>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut api = api.lock().unwrap();
    api.requests.push(RecordedRequest {
        path: format!("/v1/timer/{}/{}", index, action),
        query: None,
        body: Some(body),
    });
    if api.failing {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::NO_CONTENT
    }
}

/// In-process stand-in for the presentation software's timer API.
async fn spawn_fake_api(timers: Vec<TimerSnapshot>) -> (String, SharedApi) {
    let api = Arc::new(Mutex::new(FakeApi {
        timers,
        ..FakeApi::default()
    }));
    let app = Router::new()
        .route("/v1/timers/current", get(current_timers))
        .route("/v1/timer/:index/:action", put(control))
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), api)
}

fn control_requests(api: &SharedApi) -> Vec<RecordedRequest> {
    api.lock()
        .unwrap()
        .requests
        .iter()
        .filter(|r| r.body.is_some())
        .cloned()
        .collect()
}

async fn next_action(rx: &mut mpsc::UnboundedReceiver<Action>) -> Action {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for action")
        .expect("channel closed")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_disables_chunked_transfer() {
    let (url, api) = spawn_fake_api(service_timers()).await;
    let client = ApiClient::new(&url).unwrap();

    let timers = client.fetch_current_timers().await.unwrap();
    assert_eq!(timers, service_timers());

    let requests = api.lock().unwrap().requests.clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/v1/timers/current");
    assert_eq!(requests[0].query.as_deref(), Some("chunked=false"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_start_sends_displayed_duration() {
    let (url, api) = spawn_fake_api(service_timers()).await;
    let client = ApiClient::new(&url).unwrap();

    let timer = start_by_index(&client, 2).await.unwrap();
    assert_eq!(timer.name(), "Khotbah");

    let requests = control_requests(&api);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/v1/timer/2/start");
    assert_eq!(
        requests[0].body,
        Some(json!({
            "id": {
                "uuid": "00000000-0000-0000-0000-000000000002",
                "name": "Khotbah",
                "index": 2
            },
            "allows_overrun": true,
            "countdown": {"duration": 600}
        }))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stop_uses_same_body_shape() {
    let (url, api) = spawn_fake_api(service_timers()).await;
    let client = ApiClient::new(&url).unwrap();

    stop_by_index(&client, 0).await.unwrap();

    let requests = control_requests(&api);
    assert_eq!(requests[0].path, "/v1/timer/0/stop");
    let body = requests[0].body.as_ref().unwrap();
    assert_eq!(body["allows_overrun"], json!(true));
    assert_eq!(body["countdown"]["duration"], json!(300));
    assert_eq!(body["id"]["name"], json!("Countdown Ibadah"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reset_sends_new_duration() {
    let (url, api) = spawn_fake_api(service_timers()).await;
    let client = ApiClient::new(&url).unwrap();

    let (timer, seconds) = reset_by_index(&client, 1, "00:07:30").await.unwrap();
    assert_eq!(timer.name(), "PAW");
    assert_eq!(seconds, 450);

    let requests = control_requests(&api);
    assert_eq!(requests[0].path, "/v1/timer/1/reset");
    assert_eq!(requests[0].body.as_ref().unwrap()["countdown"]["duration"], json!(450));

    assert!(reset_by_index(&client, 1, "7 minutes").await.is_err());
    assert!(reset_by_index(&client, 9, "00:01:00").await.is_err());
    assert_eq!(control_requests(&api).len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_success_status_is_an_error() {
    let (url, api) = spawn_fake_api(service_timers()).await;
    let client = ApiClient::new(&url).unwrap();
    api.lock().unwrap().failing = true;

    let err = client.fetch_current_timers().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch (503 Service Unavailable)");

    let timer = sample_timer(2, "Khotbah", "00:10:00", TimerState::Stopped);
    let err = client.start_timer(&timer).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to start timer (503 Service Unavailable)");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_poll_failure_hides_previous_timers() {
    let (url, api) = spawn_fake_api(service_timers()).await;
    let client = ApiClient::new(&url).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _poller = spawn_poller(client, Duration::from_millis(20), tx);

    let known: Vec<String> = Vec::new();
    let mut state = DashboardState::new(VisibilityPreference::with_defaults(&known), known, Theme::Light);

    let first = next_action(&mut rx).await;
    assert!(matches!(first, Action::PollSucceeded { .. }));
    state.apply(first);
    assert!(matches!(state.grid(), GridContent::Timers(ref t) if t.len() == 4));

    api.lock().unwrap().failing = true;
    loop {
        let action = next_action(&mut rx).await;
        let failed = matches!(action, Action::PollFailed(_));
        state.apply(action);
        if failed {
            break;
        }
    }

    assert!(matches!(state.grid(), GridContent::Disconnected { .. }));
    assert_eq!(state.timers().len(), 4);

    // The loop keeps going and recovers once the API is back.
    api.lock().unwrap().failing = false;
    loop {
        let action = next_action(&mut rx).await;
        let recovered = matches!(action, Action::PollSucceeded { .. });
        state.apply(action);
        if recovered {
            break;
        }
    }
    assert!(state.error().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unresponsive_api_reports_poll_failure() {
    // Accepts connections but never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client = ApiClient::with_timeout(&format!("http://{}", addr), Duration::from_millis(150)).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _poller = spawn_poller(client, Duration::from_millis(50), tx);

    let known: Vec<String> = Vec::new();
    let mut state = DashboardState::new(VisibilityPreference::with_defaults(&known), known, Theme::Light);
    state.apply(Action::PollSucceeded {
        timers: service_timers(),
        received_at: chrono::Local::now(),
    });

    let action = next_action(&mut rx).await;
    assert!(matches!(action, Action::PollFailed(_)));
    state.apply(action);
    assert!(matches!(state.grid(), GridContent::Disconnected { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dispatcher_reports_failures_only() {
    let (url, api) = spawn_fake_api(service_timers()).await;
    let client = ApiClient::new(&url).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = CommandDispatcher::new(client, tx);
    let timer = sample_timer(2, "Khotbah", "00:10:00", TimerState::Stopped);

    dispatcher.update_duration(timer.id.clone(), 90);
    assert_eq!(next_action(&mut rx).await, Action::DurationUpdated(timer.id.clone()));

    api.lock().unwrap().failing = true;
    dispatcher.stop(timer.clone());
    assert_eq!(
        next_action(&mut rx).await,
        Action::CommandFailed("Failed to stop timer (503 Service Unavailable)".to_string())
    );

    dispatcher.update_duration(timer.id.clone(), 90);
    assert_eq!(
        next_action(&mut rx).await,
        Action::DurationUpdateFailed {
            id: timer.id.clone(),
            message: "Failed to update timer (503 Service Unavailable)".to_string(),
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dashboard_end_to_end() {
    with_test_context_async(|ctx| async move {
        let (url, api) = spawn_fake_api(service_timers()).await;
        let config = ctx.config_for(&url);
        let mut dashboard = Dashboard::new(&config, ctx.store.clone())?;

        // Wait for the first poll to land.
        for _ in 0..200 {
            dashboard.drain_actions();
            if !dashboard.state().timers().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(dashboard.state().timers().len(), 4);

        // Hide PAW; the preference is written to the store straight away.
        dashboard.handle_action(Action::ToggleVisibility("PAW".to_string()));
        assert_eq!(dashboard.state().visible_timers().len(), 3);
        let stored = ctx.store.get(VISIBILITY_KEY)?.expect("filter should be stored");
        let reloaded = VisibilityPreference::from_stored(Some(&stored), &config.known_timers);
        assert!(!reloaded.is_visible("PAW"));
        assert!(reloaded.is_visible("Khotbah"));

        // Start the first visible card.
        let selected = dashboard.state().selected_timer().cloned().expect("a card is selected");
        assert_eq!(selected.name(), "Countdown Ibadah");
        dashboard.handle_action(Action::StartRequested(selected));

        for _ in 0..200 {
            if !control_requests(&api).is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let requests = control_requests(&api);
        assert_eq!(requests[0].path, "/v1/timer/0/start");
        assert_eq!(requests[0].body.as_ref().unwrap()["countdown"]["duration"], json!(300));

        // The local list is untouched until the next poll.
        assert_eq!(dashboard.state().timers()[0].state, TimerState::Running);
        Ok(())
    })
    .await;
}
