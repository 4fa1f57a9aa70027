//! Movie browser view
//!
//! Result list with the results summary and pagination footer.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::App;
use crate::models::{format_rating, MovieSummary};
use crate::ui::Theme;

/// Title of the result panel for the current listing
fn listing_title(app: &App) -> String {
    let query = app.view.query.trim();
    if !query.is_empty() {
        format!(" RESULTS FOR \"{}\" ", query)
    } else if !app.view.filters.is_empty() {
        " DISCOVER ".to_string()
    } else {
        " POPULAR ".to_string()
    }
}

/// One row: `▸ Title (Year)            ★ 7.8`
pub fn movie_line(movie: &MovieSummary, selected: bool) -> Line<'static> {
    let marker = if selected { "▸ " } else { "  " };
    let year = movie.year().map(|y| format!(" ({})", y)).unwrap_or_default();

    Line::from(vec![
        Span::styled(
            marker,
            if selected { Theme::accent() } else { Theme::dimmed() },
        ),
        Span::styled(
            movie.title.clone(),
            if selected {
                Theme::list_item_selected()
            } else {
                Theme::text()
            },
        ),
        Span::styled(year, if selected { Theme::accent() } else { Theme::year() }),
        Span::raw(" "),
        Span::styled(
            format!("★ {}", format_rating(movie.vote_average)),
            if selected {
                Theme::accent()
            } else {
                Theme::rating(movie.vote_average)
            },
        ),
    ])
}

/// Render the result list
pub fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if app.view.loading {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(listing_title(app), Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let movies = &app.view.results.results;

    if movies.is_empty() {
        let (text, style) = if app.view.loading {
            ("⟳ Loading movies...", Theme::loading())
        } else {
            ("No movies found", Theme::dimmed())
        };
        let empty = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let visible = inner.height as usize;
    let mut list = app.list.clone();
    list.scroll_into_view(visible);

    let items: Vec<ListItem> = movies
        .iter()
        .enumerate()
        .skip(list.offset)
        .take(visible)
        .map(|(i, movie)| ListItem::new(movie_line(movie, i == list.selected)))
        .collect();

    frame.render_widget(List::new(items).style(Theme::text()), inner);
}

/// Render "Showing X-Y of Z results" and the page indicator
pub fn render_pagination(frame: &mut Frame, area: Rect, app: &App) {
    let view = &app.view;

    let mut spans = vec![Span::styled(view.results_text(), Theme::dimmed())];

    if view.total_pages() > 1 {
        if !spans[0].content.is_empty() {
            spans.push(Span::raw("   "));
        }
        let prev_style = if view.has_prev_page() {
            Theme::keybind()
        } else {
            Theme::dimmed()
        };
        let next_style = if view.has_next_page() {
            Theme::keybind()
        } else {
            Theme::dimmed()
        };
        spans.push(Span::styled("◀ p ", prev_style));
        spans.push(Span::styled(
            format!("Page {} of {}", view.page, view.total_pages()),
            Theme::title(),
        ));
        spans.push(Span::styled(" n ▶", next_style));
    }

    if view.loading {
        spans.push(Span::styled("  ⟳", Theme::loading()));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
