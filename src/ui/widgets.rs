use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use crate::models::{Theme, TimerState};

// Centralized color scheme for page chrome; per-state colors live in StateStyle.
pub struct ColorScheme;

impl ColorScheme {
    pub const GRAY_TEXT: Color = Color::Rgb(160, 160, 160);
    pub const WHITE_TEXT: Color = Color::Rgb(240, 240, 240);
    pub const DARK_TEXT: Color = Color::Rgb(17, 24, 39);

    pub const LIGHT_BG: Color = Color::Rgb(238, 242, 255);
    pub const DARK_BG: Color = Color::Rgb(15, 23, 42);

    pub const CLEAN_ACCENT: Color = Color::Rgb(217, 119, 87);
    pub const CLEAN_BLUE: Color = Color::Rgb(79, 70, 229);
    pub const LIGHT_BLUE: Color = Color::Rgb(129, 140, 248);

    pub fn page_bg(theme: Theme) -> Color {
        match theme {
            Theme::Light => Self::LIGHT_BG,
            Theme::Dark => Self::DARK_BG,
        }
    }

    pub fn page_text(theme: Theme) -> Color {
        match theme {
            Theme::Light => Self::DARK_TEXT,
            Theme::Dark => Self::WHITE_TEXT,
        }
    }

    pub fn title(theme: Theme) -> Color {
        match theme {
            Theme::Light => Self::CLEAN_BLUE,
            Theme::Dark => Self::LIGHT_BLUE,
        }
    }

    pub fn muted(theme: Theme) -> Color {
        match theme {
            Theme::Light => Color::Rgb(107, 114, 128),
            Theme::Dark => Self::GRAY_TEXT,
        }
    }

    pub fn base_block(theme: Theme) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Self::muted(theme)))
            .border_type(BorderType::Rounded)
            .style(Style::default().bg(Self::page_bg(theme)).fg(Self::page_text(theme)))
    }

    pub fn clean_block(theme: Theme) -> Block<'static> {
        Block::default()
            .borders(Borders::NONE)
            .style(Style::default().bg(Self::page_bg(theme)))
    }
}

/// Visual treatment of one timer card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateStyle {
    pub background: Color,
    pub border: Color,
    pub text: Color,
    pub badge_fg: Color,
    pub badge_bg: Color,
    pub accent: Color,
}

impl StateStyle {
    pub fn badge(&self, state: TimerState) -> Span<'static> {
        Span::styled(
            format!(" {} ", state.badge_label()),
            Style::default()
                .fg(self.badge_fg)
                .bg(self.badge_bg)
                .add_modifier(Modifier::BOLD),
        )
    }
}

/// Shades of one hue, light-theme and dark-theme variants.
struct Palette {
    light_bg: Color,
    light_border: Color,
    light_text: Color,
    light_accent: Color,
    dark_bg: Color,
    dark_border: Color,
    dark_text: Color,
    dark_accent: Color,
    badge: Color,
}

const GREEN: Palette = Palette {
    light_bg: Color::Rgb(240, 253, 244),
    light_border: Color::Rgb(134, 239, 172),
    light_text: Color::Rgb(20, 83, 45),
    light_accent: Color::Rgb(22, 163, 74),
    dark_bg: Color::Rgb(5, 46, 22),
    dark_border: Color::Rgb(21, 128, 61),
    dark_text: Color::Rgb(220, 252, 231),
    dark_accent: Color::Rgb(74, 222, 128),
    badge: Color::Rgb(34, 197, 94),
};

const RED: Palette = Palette {
    light_bg: Color::Rgb(254, 242, 242),
    light_border: Color::Rgb(252, 165, 165),
    light_text: Color::Rgb(127, 29, 29),
    light_accent: Color::Rgb(220, 38, 38),
    dark_bg: Color::Rgb(69, 10, 10),
    dark_border: Color::Rgb(185, 28, 28),
    dark_text: Color::Rgb(254, 226, 226),
    dark_accent: Color::Rgb(248, 113, 113),
    badge: Color::Rgb(239, 68, 68),
};

const AMBER: Palette = Palette {
    light_bg: Color::Rgb(255, 251, 235),
    light_border: Color::Rgb(252, 211, 77),
    light_text: Color::Rgb(120, 53, 15),
    light_accent: Color::Rgb(217, 119, 6),
    dark_bg: Color::Rgb(69, 26, 3),
    dark_border: Color::Rgb(180, 83, 9),
    dark_text: Color::Rgb(254, 243, 199),
    dark_accent: Color::Rgb(251, 191, 36),
    badge: Color::Rgb(245, 158, 11),
};

const GRAY: Palette = Palette {
    light_bg: Color::Rgb(249, 250, 251),
    light_border: Color::Rgb(209, 213, 219),
    light_text: Color::Rgb(17, 24, 39),
    light_accent: Color::Rgb(75, 85, 99),
    dark_bg: Color::Rgb(17, 24, 39),
    dark_border: Color::Rgb(55, 65, 81),
    dark_text: Color::Rgb(255, 255, 255),
    dark_accent: Color::Rgb(156, 163, 175),
    badge: Color::Rgb(107, 114, 128),
};

/// Map a timer state to its card styling. `complete` shares the running
/// treatment, the overrun states share red.
pub fn state_style(state: TimerState, theme: Theme) -> StateStyle {
    let palette = match state {
        TimerState::Running | TimerState::Complete => &GREEN,
        TimerState::Overrunning | TimerState::Overran => &RED,
        TimerState::Stopped => &AMBER,
        TimerState::Unknown => &GRAY,
    };

    match theme {
        Theme::Light => StateStyle {
            background: palette.light_bg,
            border: palette.light_border,
            text: palette.light_text,
            badge_fg: Color::White,
            badge_bg: palette.badge,
            accent: palette.light_accent,
        },
        Theme::Dark => StateStyle {
            background: palette.dark_bg,
            border: palette.dark_border,
            text: palette.dark_text,
            badge_fg: Color::White,
            badge_bg: palette.badge,
            accent: palette.dark_accent,
        },
    }
}

/// Ticks once per successful poll so the operator can see data arriving.
pub struct Spinner {
    frames: Vec<&'static str>,
    current: usize,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            frames: vec!["|", "/", "-", "\\"],
            current: 0,
        }
    }

    pub fn next(&mut self) -> &'static str {
        self.current = (self.current + 1) % self.frames.len();
        self.frames[self.current]
    }

    pub fn current(&self) -> &'static str {
        self.frames[self.current]
    }
}
