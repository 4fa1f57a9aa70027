//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first navigation throughout.

pub mod theme;
pub mod search;
pub mod browser;
pub mod detail;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, AppState, InputMode};

/// Main render function - dispatches to view-specific renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Clear with background color
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(Theme::BACKGROUND)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Filters
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    search::render_filter_bar(frame, chunks[1], app);
    render_content(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);
}

/// Logo and search box
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Logo
            Constraint::Min(1),     // Search box
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("CINE", Theme::title()),
        Span::styled("SEARCH", Theme::secondary().add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    search::render_search_bar(frame, header_chunks[1], app);
}

fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    match (&app.state, &app.detail) {
        (AppState::Detail, Some(detail)) => detail::render_detail(frame, area, detail),
        _ => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(area);
            browser::render_results(frame, chunks[0], app);
            browser::render_pagination(frame, chunks[1], app);
        }
    }
}

fn hints(app: &App) -> &'static [(&'static str, &'static str)] {
    match (&app.input_mode, &app.state) {
        (InputMode::Editing, _) => &[("Enter", "search"), ("Esc", "cancel"), ("^U", "clear")],
        (_, AppState::Browse) => &[
            ("/", "search"),
            ("j/k", "move"),
            ("Enter", "open"),
            ("n/p", "page"),
            ("c", "clear filters"),
            ("q", "quit"),
        ],
        (_, AppState::Detail) => &[("Tab", "section"), ("j/k", "scroll"), ("Esc", "back"), ("q", "quit")],
    }
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let mut spans = vec![mode_indicator, Span::raw(" ")];
    for (key, desc) in hints(app) {
        spans.push(Span::styled(format!("{} ", key), Theme::keybind()));
        spans.push(Span::styled(format!("{}  ", desc), Theme::keybind_desc()));
    }

    let status = Paragraph::new(Line::from(spans)).style(Theme::status_bar());
    frame.render_widget(status, area);
}
