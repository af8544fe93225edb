use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{error, info, warn};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    cli::formatter::truncate_string,
    models::{visibility::VISIBILITY_KEY, Config, DraftEdit, DraftField, TimerSnapshot, VisibilityPreference},
    services::{spawn_poller, ApiClient, CommandDispatcher, PollHandle},
    state::{Action, DashboardState, Effect, GridContent, Move, GRID_COLUMNS},
    ui::{
        formatter::Formatter,
        widgets::{state_style, ColorScheme, Spinner},
    },
    utils::LocalStore,
};

const CARD_HEIGHT: u16 = 8;

/// Result of translating one key press.
#[derive(Debug, PartialEq)]
pub enum KeyOutcome {
    Quit,
    Dispatch(Action),
    Ignored,
}

pub struct Dashboard {
    state: DashboardState,
    store: LocalStore,
    dispatcher: CommandDispatcher,
    rx: UnboundedReceiver<Action>,
    spinner: Spinner,
    _poller: PollHandle,
}

impl Dashboard {
    /// Build the dashboard and start polling. Must be called inside a tokio
    /// runtime.
    pub fn new(config: &Config, store: LocalStore) -> Result<Self> {
        let client = ApiClient::new(&config.api_url)?;

        let stored = match store.get(VISIBILITY_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Could not read stored timer filter: {}", e);
                None
            }
        };
        let visibility = VisibilityPreference::from_stored(stored.as_deref(), &config.known_timers);
        let state = DashboardState::new(visibility, config.known_timers.clone(), config.theme);

        let (tx, rx): (UnboundedSender<Action>, UnboundedReceiver<Action>) = mpsc::unbounded_channel();
        let poller = spawn_poller(
            client.clone(),
            Duration::from_millis(config.poll_interval_ms),
            tx.clone(),
        );
        info!(
            "Polling {} every {}ms",
            client.base_url(),
            config.poll_interval_ms
        );

        Ok(Self {
            state,
            store,
            dispatcher: CommandDispatcher::new(client, tx),
            rx,
            spinner: Spinner::new(),
            _poller: poller,
        })
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.drain_actions();

            let spinner = self.spinner.current();
            terminal.draw(|f| render_dashboard(f, &self.state, spinner))?;

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match translate_key(&self.state, key) {
                            KeyOutcome::Quit => break,
                            KeyOutcome::Dispatch(action) => self.handle_action(action),
                            KeyOutcome::Ignored => {}
                        }
                    }
                    _ => {}
                }
            }
        }
        info!("Dashboard closed");
        Ok(())
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Apply every action the poll and command tasks have delivered so far.
    pub fn drain_actions(&mut self) {
        while let Ok(action) = self.rx.try_recv() {
            if matches!(action, Action::PollSucceeded { .. }) {
                self.spinner.next();
            }
            self.handle_action(action);
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        for effect in self.state.apply(action) {
            match effect {
                Effect::PersistVisibility(json) => {
                    if let Err(e) = self.store.set(VISIBILITY_KEY, &json) {
                        error!("Failed to save timer filter: {}", e);
                    }
                }
                command => self.dispatcher.dispatch(command),
            }
        }
    }
}

/// Map a key press to what it means in the current state.
pub fn translate_key(state: &DashboardState, key: KeyEvent) -> KeyOutcome {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyOutcome::Quit;
    }

    if state.editor().is_some() {
        let action = match key.code {
            KeyCode::Esc => Action::CloseEditor,
            KeyCode::Enter => Action::SubmitEdit,
            KeyCode::Tab | KeyCode::Right => Action::EditDraft(DraftEdit::FocusNext),
            KeyCode::BackTab | KeyCode::Left => Action::EditDraft(DraftEdit::FocusPrevious),
            KeyCode::Up => Action::EditDraft(DraftEdit::Increment),
            KeyCode::Down => Action::EditDraft(DraftEdit::Decrement),
            KeyCode::Backspace => Action::EditDraft(DraftEdit::Backspace),
            KeyCode::Char(c) if c.is_ascii_digit() => Action::EditDraft(DraftEdit::Digit(c)),
            _ => return KeyOutcome::Ignored,
        };
        return KeyOutcome::Dispatch(action);
    }

    let selected = || state.selected_timer().cloned();
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
        KeyCode::Left | KeyCode::Char('h') => Action::MoveSelection(Move::Left),
        KeyCode::Right | KeyCode::Char('l') => Action::MoveSelection(Move::Right),
        KeyCode::Up | KeyCode::Char('k') => Action::MoveSelection(Move::Up),
        KeyCode::Down | KeyCode::Char('j') => Action::MoveSelection(Move::Down),
        KeyCode::Char('s') => match selected() {
            Some(timer) => Action::StartRequested(timer),
            None => return KeyOutcome::Ignored,
        },
        KeyCode::Char('x') => match selected() {
            Some(timer) => Action::StopRequested(timer),
            None => return KeyOutcome::Ignored,
        },
        KeyCode::Char('e') | KeyCode::Enter => match selected() {
            Some(timer) => Action::OpenEditor(timer),
            None => return KeyOutcome::Ignored,
        },
        KeyCode::Char('d') => Action::ToggleTheme,
        KeyCode::Char(c @ '1'..='9') => {
            let slot = c as usize - '1' as usize;
            match state.known_timers().get(slot) {
                Some(name) => Action::ToggleVisibility(name.clone()),
                None => return KeyOutcome::Ignored,
            }
        }
        _ => return KeyOutcome::Ignored,
    };
    KeyOutcome::Dispatch(action)
}

pub fn render_dashboard(f: &mut Frame, state: &DashboardState, spinner: &str) {
    let theme = state.theme();
    let banner_height = if state.command_error().is_some() { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Header
            Constraint::Length(3),             // Filter bar
            Constraint::Length(banner_height), // Command error
            Constraint::Min(0),                // Grid
            Constraint::Length(2),             // Footer
        ])
        .split(f.size());

    f.render_widget(ColorScheme::clean_block(theme), f.size());

    render_header(f, chunks[0], state, spinner);
    render_filter_bar(f, chunks[1], state);
    if let Some(message) = state.command_error() {
        f.render_widget(
            Paragraph::new(format!("Error: {}", message)).style(
                Style::default()
                    .fg(ratatui::style::Color::White)
                    .bg(ratatui::style::Color::Rgb(220, 38, 38))
                    .add_modifier(Modifier::BOLD),
            ),
            chunks[2],
        );
    }

    match state.grid() {
        GridContent::Disconnected { message } => render_disconnected(f, chunks[3], state, message),
        GridContent::Timers(timers) if timers.is_empty() => {
            f.render_widget(
                Paragraph::new("No timers to show")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(ColorScheme::muted(theme))),
                chunks[3],
            );
        }
        GridContent::Timers(timers) => render_grid(f, chunks[3], state, &timers),
    }

    render_keyboard_hints(f, chunks[4], state);

    if state.editor().is_some() {
        render_editor(f, f.size(), state);
    }
}

fn render_header(f: &mut Frame, area: Rect, state: &DashboardState, spinner: &str) {
    let theme = state.theme();
    let line = Line::from(vec![
        Span::styled(
            "Timer Dashboard",
            Style::default()
                .fg(ColorScheme::title(theme))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!(
                "{} {}",
                spinner,
                Formatter::format_last_update(state.last_update().as_ref())
            ),
            Style::default().fg(ColorScheme::muted(theme)),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{} theme]", theme),
            Style::default().fg(ColorScheme::muted(theme)),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_filter_bar(f: &mut Frame, area: Rect, state: &DashboardState) {
    let theme = state.theme();
    let mut spans = Vec::new();
    for (i, name) in state.known_timers().iter().enumerate().take(9) {
        let visible = state.visibility().is_visible(name);
        let style = if visible {
            Style::default()
                .fg(ColorScheme::page_text(theme))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(ColorScheme::muted(theme))
        };
        spans.push(Span::styled(Formatter::filter_entry(i + 1, name, visible), style));
        spans.push(Span::raw("   "));
    }

    let block = ColorScheme::base_block(theme).title(" Show Timers ");
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_disconnected(f: &mut Frame, area: Rect, state: &DashboardState, message: &str) {
    let theme = state.theme();
    let panel = Formatter::centered_rect(60, 50, area);
    let text = vec![
        Line::from(Span::styled(
            "ProPresenter is not connected!",
            Style::default()
                .fg(ColorScheme::page_text(theme))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Please wait or contact the Multimedia volunteer",
            Style::default().fg(ColorScheme::muted(theme)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(ColorScheme::muted(theme))
                .add_modifier(Modifier::DIM),
        )),
    ];

    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(ColorScheme::base_block(theme)),
        panel,
    );
}

fn render_grid(f: &mut Frame, area: Rect, state: &DashboardState, timers: &[&TimerSnapshot]) {
    let rows_total = (timers.len() + GRID_COLUMNS - 1) / GRID_COLUMNS;
    let rows_fit = ((area.height / CARD_HEIGHT) as usize).max(1);
    let selected_row = state.selected_index() / GRID_COLUMNS;
    // Scroll just enough to keep the selected row on screen.
    let first_row = selected_row.saturating_sub(rows_fit - 1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            (0..rows_fit)
                .map(|_| Constraint::Length(CARD_HEIGHT))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .split(area);

    for (slot, row) in (first_row..rows_total).take(rows_fit).enumerate() {
        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(row_areas[slot]);

        for col in 0..GRID_COLUMNS {
            let index = row * GRID_COLUMNS + col;
            if let Some(timer) = timers.get(index) {
                render_timer_card(f, col_areas[col], state, timer, index == state.selected_index());
            }
        }
    }
}

fn render_timer_card(f: &mut Frame, area: Rect, state: &DashboardState, timer: &TimerSnapshot, selected: bool) {
    let style = state_style(timer.state, state.theme());
    let name_width = area.width.saturating_sub(4) as usize;

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style.border))
        .style(Style::default().bg(style.background).fg(style.text));
    block = if selected {
        block
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(style.accent).add_modifier(Modifier::BOLD))
    } else {
        block.border_type(BorderType::Rounded)
    };

    let text = vec![
        Line::from(Span::styled(
            truncate_string(timer.name(), name_width),
            Style::default().fg(style.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(style.badge(timer.state)),
        Line::from(""),
        Line::from(Span::styled(
            timer.time.clone(),
            Style::default().fg(style.text).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            "Hours : Minutes : Seconds",
            Style::default().fg(ColorScheme::muted(state.theme())),
        ))
        .alignment(Alignment::Center),
    ];

    f.render_widget(Paragraph::new(text).block(block), area);
}

fn render_editor(f: &mut Frame, screen: Rect, state: &DashboardState) {
    let Some(session) = state.editor() else {
        return;
    };
    let theme = state.theme();
    let area = Formatter::centered_rect(50, 40, screen);

    let field = |which: DraftField| {
        let style = if session.draft.focus == which {
            Style::default()
                .fg(ColorScheme::page_bg(theme))
                .bg(ColorScheme::title(theme))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(ColorScheme::page_text(theme))
                .add_modifier(Modifier::BOLD)
        };
        Span::styled(format!(" {} ", session.draft.field(which)), style)
    };

    let text = vec![
        Line::from(""),
        Line::from(vec![
            field(DraftField::Hours),
            Span::raw(" : "),
            field(DraftField::Minutes),
            Span::raw(" : "),
            field(DraftField::Seconds),
        ])
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            "Hours : Minutes : Seconds",
            Style::default().fg(ColorScheme::muted(theme)),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            "Enter Save   Esc Cancel   Tab Next field   Up/Down Adjust",
            Style::default().fg(ColorScheme::muted(theme)),
        ))
        .alignment(Alignment::Center),
    ];

    let saving = if session.saving { " (saving)" } else { "" };
    let block = ColorScheme::base_block(theme)
        .title(format!(" Edit Timer: {}{} ", session.timer.name(), saving))
        .border_style(Style::default().fg(ColorScheme::title(theme)));

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn render_keyboard_hints(f: &mut Frame, area: Rect, state: &DashboardState) {
    let hints = if state.editor().is_some() {
        vec![
            ("0-9", "Type"),
            ("Tab", "Next"),
            ("↑/↓", "Adjust"),
            ("Enter", "Save"),
            ("Esc", "Cancel"),
        ]
    } else {
        vec![
            ("←↑↓→", "Select"),
            ("s", "Start"),
            ("x", "Stop"),
            ("e", "Edit"),
            ("1-9", "Filter"),
            ("d", "Theme"),
            ("q", "Quit"),
        ]
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(
                    format!(" {} ", key),
                    Style::default()
                        .fg(ColorScheme::CLEAN_ACCENT)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{} ", desc),
                    Style::default().fg(ColorScheme::muted(state.theme())),
                ),
            ]
        })
        .collect();

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(ColorScheme::muted(state.theme())));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
