use chrono::{DateTime, Local};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct Formatter;

impl Formatter {
    pub fn format_time_only(timestamp: &DateTime<Local>) -> String {
        timestamp.format("%H:%M:%S").to_string()
    }

    pub fn format_last_update(timestamp: Option<&DateTime<Local>>) -> String {
        match timestamp {
            Some(ts) => format!("Updated {}", Self::format_time_only(ts)),
            None => "Waiting for first update".to_string(),
        }
    }

    /// Filter bar entry, e.g. `1 [x] PAW`.
    pub fn filter_entry(key: usize, name: &str, visible: bool) -> String {
        let mark = if visible { "x" } else { " " };
        format!("{} [{}] {}", key, mark, name)
    }

    pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
