//! Search bar and filter controls
//!
//! The search box mirrors [`App::input`]; the filter bar shows one chip per
//! discover filter with its hotkey.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, InputMode, LANGUAGE_OPTIONS};
use crate::models::SearchFilters;
use crate::ui::Theme;

const ANY: &str = "Any";

// =============================================================================
// Filter Labels
// =============================================================================

pub fn genre_label(app: &App, filters: &SearchFilters) -> String {
    match filters.genre {
        None => ANY.to_string(),
        Some(id) => app
            .view
            .genre_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", id)),
    }
}

pub fn year_label(filters: &SearchFilters) -> String {
    filters
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| ANY.to_string())
}

pub fn rating_label(filters: &SearchFilters) -> String {
    filters
        .min_rating
        .map(|r| format!("{}+", r))
        .unwrap_or_else(|| ANY.to_string())
}

pub fn sort_label(filters: &SearchFilters) -> String {
    filters.sort.unwrap_or_default().label().to_string()
}

pub fn language_label(filters: &SearchFilters) -> String {
    match filters.language() {
        None => ANY.to_string(),
        Some(code) => LANGUAGE_OPTIONS
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| code.to_string()),
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Render the search input box
pub fn render_search_bar(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;

    let text = if editing {
        let cursor = app.input.cursor.min(app.input.query.len());
        let (before, after) = app.input.query.split_at(cursor);
        format!("⌕ {}│{}", before, after)
    } else if app.input.query.is_empty() {
        "⌕ Press / to search movies...".to_string()
    } else {
        format!("⌕ {}", app.input.query)
    };

    let (border_style, text_style) = if editing {
        (Theme::border_focused(), Theme::input().fg(Theme::PRIMARY))
    } else {
        (Theme::border(), Theme::input())
    };

    let search_box = Paragraph::new(text).style(text_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(" SEARCH ", Theme::title())),
    );
    frame.render_widget(search_box, area);
}

fn chip(key: &'static str, name: &'static str, value: String, active: bool) -> Vec<Span<'static>> {
    let value_style = if active {
        Theme::filter_active()
    } else {
        Theme::filter_inactive()
    };
    vec![
        Span::styled(format!("[{}]", key), Theme::keybind()),
        Span::styled(format!(" {}: ", name), Theme::keybind_desc()),
        Span::styled(value, value_style),
        Span::raw("  "),
    ]
}

/// Render the filter chips
pub fn render_filter_bar(frame: &mut Frame, area: Rect, app: &App) {
    let filters = &app.filters;

    let mut spans = Vec::new();
    spans.extend(chip("g", "Genre", genre_label(app, filters), filters.genre.is_some()));
    spans.extend(chip("y", "Year", year_label(filters), filters.year.is_some()));
    spans.extend(chip(
        "r",
        "Rating",
        rating_label(filters),
        filters.min_rating.is_some(),
    ));
    spans.extend(chip("o", "Sort", sort_label(filters), filters.sort.is_some()));
    spans.extend(chip(
        "l",
        "Language",
        language_label(filters),
        filters.language().is_some(),
    ));
    if !filters.is_empty() {
        spans.push(Span::styled("[c]", Theme::keybind()));
        spans.push(Span::styled(" Clear", Theme::keybind_desc()));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border())
            .title(Span::styled(" FILTERS ", Theme::title())),
    );
    frame.render_widget(bar, area);
}
