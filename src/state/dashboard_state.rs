use chrono::{DateTime, Local};

use super::action::{Action, Effect, Move};
use crate::models::{EditDraft, Theme, TimerIdentity, TimerSnapshot, VisibilityPreference};

/// Cards per grid row.
pub const GRID_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSource {
    Poll,
    Command,
}

/// The single error slot. Poll and command failures overwrite each other;
/// the next successful poll clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSlot {
    pub message: String,
    pub source: ErrorSource,
}

/// The edit dialog: which timer is being changed and the duration typed so far.
/// `saving` is set while a submitted reset is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub timer: TimerSnapshot,
    pub draft: EditDraft,
    pub saving: bool,
}

impl EditSession {
    fn edits(&self, id: &TimerIdentity) -> bool {
        self.timer.id.uuid == id.uuid
    }
}

/// What the grid area shows.
#[derive(Debug, PartialEq)]
pub enum GridContent<'a> {
    Disconnected { message: &'a str },
    Timers(Vec<&'a TimerSnapshot>),
}

/// All dashboard state, mutated only through [`DashboardState::apply`].
#[derive(Debug, Clone)]
pub struct DashboardState {
    timers: Vec<TimerSnapshot>,
    error: Option<ErrorSlot>,
    visibility: VisibilityPreference,
    known_timers: Vec<String>,
    editor: Option<EditSession>,
    selected: usize,
    theme: Theme,
    last_update: Option<DateTime<Local>>,
}

impl DashboardState {
    pub fn new(visibility: VisibilityPreference, known_timers: Vec<String>, theme: Theme) -> Self {
        Self {
            timers: Vec::new(),
            error: None,
            visibility,
            known_timers,
            editor: None,
            selected: 0,
            theme,
            last_update: None,
        }
    }

    /// Apply one action and return the side effects it asks for.
    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::PollSucceeded { timers, received_at } => {
                self.timers = timers;
                self.error = None;
                self.last_update = Some(received_at);
                self.clamp_selection();
                Vec::new()
            }
            Action::PollFailed(message) => {
                self.error = Some(ErrorSlot {
                    message,
                    source: ErrorSource::Poll,
                });
                Vec::new()
            }
            Action::StartRequested(timer) => vec![Effect::Start(timer)],
            Action::StopRequested(timer) => vec![Effect::Stop(timer)],
            Action::CommandFailed(message) => {
                self.set_command_error(message);
                Vec::new()
            }
            Action::ToggleVisibility(name) => {
                self.visibility.toggle(&name);
                self.clamp_selection();
                match self.visibility.to_json() {
                    Ok(json) => vec![Effect::PersistVisibility(json)],
                    Err(e) => {
                        log::error!("Failed to serialize timer filter: {}", e);
                        Vec::new()
                    }
                }
            }
            Action::OpenEditor(timer) => {
                let draft = EditDraft::from_time_string(&timer.time);
                self.editor = Some(EditSession {
                    timer,
                    draft,
                    saving: false,
                });
                Vec::new()
            }
            Action::EditDraft(edit) => {
                if let Some(session) = self.editor.as_mut() {
                    session.draft.apply(edit);
                }
                Vec::new()
            }
            Action::SubmitEdit => match self.editor.as_mut() {
                Some(session) if !session.saving => {
                    session.saving = true;
                    vec![Effect::UpdateDuration {
                        id: session.timer.id.clone(),
                        duration: session.draft.total_seconds(),
                    }]
                }
                _ => Vec::new(),
            },
            Action::DurationUpdated(id) => {
                // Results for a dialog closed in the meantime are ignored.
                if self.editor.as_ref().is_some_and(|session| session.edits(&id)) {
                    self.editor = None;
                }
                Vec::new()
            }
            Action::CloseEditor => {
                self.editor = None;
                Vec::new()
            }
            Action::DurationUpdateFailed { id, message } => {
                if let Some(session) = self.editor.as_mut().filter(|session| session.edits(&id)) {
                    session.saving = false;
                }
                self.set_command_error(message);
                Vec::new()
            }
            Action::MoveSelection(direction) => {
                self.move_selection(direction);
                Vec::new()
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                Vec::new()
            }
        }
    }

    fn set_command_error(&mut self, message: String) {
        self.error = Some(ErrorSlot {
            message,
            source: ErrorSource::Command,
        });
    }

    fn move_selection(&mut self, direction: Move) {
        let count = self.visible_timers().len();
        if count == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected.min(count - 1);
        self.selected = match direction {
            Move::Left => current.saturating_sub(1),
            Move::Right => (current + 1).min(count - 1),
            Move::Up => current.checked_sub(GRID_COLUMNS).unwrap_or(current),
            Move::Down if current + GRID_COLUMNS < count => current + GRID_COLUMNS,
            Move::Down => current,
        };
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_timers().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    pub fn timers(&self) -> &[TimerSnapshot] {
        &self.timers
    }

    /// Timers that pass the visibility filter, in server order.
    pub fn visible_timers(&self) -> Vec<&TimerSnapshot> {
        self.timers
            .iter()
            .filter(|timer| self.visibility.is_visible(timer.name()))
            .collect()
    }

    /// A poll failure replaces the grid; a command failure does not.
    pub fn grid(&self) -> GridContent<'_> {
        match &self.error {
            Some(slot) if slot.source == ErrorSource::Poll => GridContent::Disconnected {
                message: &slot.message,
            },
            _ => GridContent::Timers(self.visible_timers()),
        }
    }

    pub fn error(&self) -> Option<&ErrorSlot> {
        self.error.as_ref()
    }

    /// Message for the banner above the grid, only for command failures.
    pub fn command_error(&self) -> Option<&str> {
        self.error
            .as_ref()
            .filter(|slot| slot.source == ErrorSource::Command)
            .map(|slot| slot.message.as_str())
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_timer(&self) -> Option<&TimerSnapshot> {
        match self.grid() {
            GridContent::Timers(timers) => timers.get(self.selected).copied(),
            GridContent::Disconnected { .. } => None,
        }
    }

    pub fn editor(&self) -> Option<&EditSession> {
        self.editor.as_ref()
    }

    pub fn visibility(&self) -> &VisibilityPreference {
        &self.visibility
    }

    pub fn known_timers(&self) -> &[String] {
        &self.known_timers
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }
}
