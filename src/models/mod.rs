pub mod config;
pub mod draft;
pub mod timer;
pub mod visibility;

pub use config::{Config, Theme};
pub use draft::{DraftEdit, DraftField, EditDraft};
pub use timer::{TimerIdentity, TimerSnapshot, TimerState};
pub use visibility::VisibilityPreference;
