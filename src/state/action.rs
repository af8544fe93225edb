use chrono::{DateTime, Local};

use crate::models::{DraftEdit, TimerIdentity, TimerSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

/// Everything that can change dashboard state. Poll and command tasks send
/// these over a channel; key presses are translated into them by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    PollSucceeded {
        timers: Vec<TimerSnapshot>,
        received_at: DateTime<Local>,
    },
    PollFailed(String),

    StartRequested(TimerSnapshot),
    StopRequested(TimerSnapshot),
    CommandFailed(String),

    ToggleVisibility(String),

    OpenEditor(TimerSnapshot),
    EditDraft(DraftEdit),
    SubmitEdit,
    DurationUpdated(TimerIdentity),
    DurationUpdateFailed { id: TimerIdentity, message: String },
    CloseEditor,

    MoveSelection(Move),
    ToggleTheme,
}

/// Side effects requested by the reducer, carried out by the dashboard loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Start(TimerSnapshot),
    Stop(TimerSnapshot),
    UpdateDuration { id: TimerIdentity, duration: i64 },
    PersistVisibility(String),
}
