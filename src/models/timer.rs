use serde::{Deserialize, Serialize};

/// Identity of a timer slot as reported by the presentation API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerIdentity {
    pub uuid: String,
    pub name: String,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Running,
    Stopped,
    Overran,
    Overrunning,
    Complete,
    #[serde(other)]
    Unknown,
}

impl TimerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Running => "running",
            TimerState::Stopped => "stopped",
            TimerState::Overran => "overran",
            TimerState::Overrunning => "overrunning",
            TimerState::Complete => "complete",
            TimerState::Unknown => "unknown",
        }
    }

    /// Text shown on the state badge. `complete` reads as running; the
    /// underlying state is left untouched.
    pub fn badge_label(&self) -> String {
        match self {
            TimerState::Complete => "RUNNING".to_string(),
            other => other.as_str().to_uppercase(),
        }
    }
}

/// One timer as returned by a single poll. Never mutated; the next poll
/// replaces the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub id: TimerIdentity,
    pub time: String,
    pub state: TimerState,
    pub allows_overrun: bool,
}

impl TimerSnapshot {
    pub fn name(&self) -> &str {
        &self.id.name
    }

    pub fn index(&self) -> u32 {
        self.id.index
    }
}
