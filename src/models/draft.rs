use crate::utils::duration::{hms_to_seconds, parse_leading_int};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Hours,
    Minutes,
    Seconds,
}

impl DraftField {
    pub fn next(self) -> Self {
        match self {
            DraftField::Hours => DraftField::Minutes,
            DraftField::Minutes => DraftField::Seconds,
            DraftField::Seconds => DraftField::Hours,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            DraftField::Hours => DraftField::Seconds,
            DraftField::Minutes => DraftField::Hours,
            DraftField::Seconds => DraftField::Minutes,
        }
    }

    fn max(self) -> i64 {
        match self {
            DraftField::Hours => 99,
            DraftField::Minutes | DraftField::Seconds => 59,
        }
    }
}

/// Keystroke-level edits applied to an [`EditDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftEdit {
    FocusNext,
    FocusPrevious,
    Digit(char),
    Backspace,
    Increment,
    Decrement,
}

/// The duration being typed into the edit dialog. Each field holds a
/// two-digit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub focus: DraftField,
}

impl Default for EditDraft {
    fn default() -> Self {
        Self {
            hours: "00".to_string(),
            minutes: "00".to_string(),
            seconds: "00".to_string(),
            focus: DraftField::Hours,
        }
    }
}

impl EditDraft {
    pub fn new(hours: &str, minutes: &str, seconds: &str) -> Self {
        Self {
            hours: hours.to_string(),
            minutes: minutes.to_string(),
            seconds: seconds.to_string(),
            focus: DraftField::Hours,
        }
    }

    /// Seed a draft from a displayed `HH:MM:SS` value. Anything that is not
    /// three components gives an all-zero draft.
    pub fn from_time_string(time: &str) -> Self {
        let parts: Vec<&str> = time.split(':').collect();
        match parts.as_slice() {
            [h, m, s] => Self::new(h, m, s),
            _ => Self::default(),
        }
    }

    pub fn total_seconds(&self) -> i64 {
        hms_to_seconds(
            parse_leading_int(&self.hours),
            parse_leading_int(&self.minutes),
            parse_leading_int(&self.seconds),
        )
        .unwrap_or(0)
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Hours => &self.hours,
            DraftField::Minutes => &self.minutes,
            DraftField::Seconds => &self.seconds,
        }
    }

    fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Hours => &mut self.hours,
            DraftField::Minutes => &mut self.minutes,
            DraftField::Seconds => &mut self.seconds,
        }
    }

    pub fn apply(&mut self, edit: DraftEdit) {
        let focus = self.focus;
        match edit {
            DraftEdit::FocusNext => self.focus = focus.next(),
            DraftEdit::FocusPrevious => self.focus = focus.previous(),
            DraftEdit::Digit(c) if c.is_ascii_digit() => {
                // Typed digits shift in from the right: "05" + '3' -> "53".
                let field = self.field_mut(focus);
                let last = field.chars().last().unwrap_or('0');
                *field = format!("{}{}", last, c);
            }
            DraftEdit::Digit(_) => {}
            DraftEdit::Backspace => {
                let field = self.field_mut(focus);
                let first = field.chars().rev().nth(1).unwrap_or('0');
                *field = format!("0{}", first);
            }
            DraftEdit::Increment => self.step(focus, 1),
            DraftEdit::Decrement => self.step(focus, -1),
        }
    }

    fn step(&mut self, field: DraftField, delta: i64) {
        let max = field.max();
        let current = parse_leading_int(self.field(field)).clamp(0, max);
        let next = (current + delta).rem_euclid(max + 1);
        *self.field_mut(field) = format!("{:02}", next);
    }
}
