use crate::models::{TimerSnapshot, TimerState};

pub struct CliFormatter;

impl CliFormatter {
    pub fn print_section_header(title: &str) {
        println!("\n{}", ansi_color("cyan", title, true));
        println!("{}", "─".repeat(title.chars().count()).dimmed());
    }

    pub fn print_field(label: &str, value: &str, color: Option<&str>) {
        let colored_value = match color {
            Some(c) => ansi_color(c, value, false),
            None => value.to_string(),
        };
        println!("  {:<18} {}", format!("{}:", label).dimmed(), colored_value);
    }

    pub fn print_timer_entry(timer: &TimerSnapshot) {
        println!("{}", Self::timer_line(timer));
    }

    /// One row of `list` output: index, name, badge, time.
    pub fn timer_line(timer: &TimerSnapshot) -> String {
        let color = state_color(timer.state);
        format!(
            "  {:>3}  {:<24} {:<13} {}",
            timer.index(),
            ansi_color("yellow", &truncate_string(timer.name(), 24), true),
            ansi_color(color, &timer.state.badge_label(), true),
            ansi_color("white", &timer.time, false)
        )
    }

    pub fn print_success(message: &str) {
        println!("{} {}", ansi_color("green", "✓", true), message);
    }

    pub fn print_empty_state(message: &str) {
        println!("  {}", message.dimmed());
    }
}

fn state_color(state: TimerState) -> &'static str {
    match state {
        TimerState::Running | TimerState::Complete => "green",
        TimerState::Overrunning | TimerState::Overran => "red",
        TimerState::Stopped => "yellow",
        TimerState::Unknown => "gray",
    }
}

fn ansi_color(color: &str, text: &str, bold: bool) -> String {
    let color_code = match color {
        "red" => "31",
        "green" => "32",
        "yellow" => "33",
        "blue" => "34",
        "magenta" => "35",
        "cyan" => "36",
        "white" => "37",
        "gray" => "90",
        _ => "37",
    };

    if bold {
        format!("\x1b[1;{}m{}\x1b[0m", color_code, text)
    } else {
        format!("\x1b[{}m{}\x1b[0m", color_code, text)
    }
}

pub trait StringFormat {
    fn dimmed(&self) -> String;
}

impl StringFormat for str {
    fn dimmed(&self) -> String {
        format!("\x1b[2m{}\x1b[0m", self)
    }
}

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
