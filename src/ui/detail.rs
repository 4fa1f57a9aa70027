//! Detail view for a single movie
//!
//! Header facts, overview, key people and money, then Cast/Crew/Details tabs.
//! Shows a not-found panel when the movie could not be loaded.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::{DetailState, DetailTab, ListState};
use crate::models::{format_currency, format_thousands, Credits, MovieDetail};
use crate::ui::Theme;

fn panel(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(title, Theme::title()))
}

fn fact(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Theme::dimmed()),
        Span::styled(value, Theme::text()),
    ])
}

/// Render the detail screen
pub fn render_detail(frame: &mut Frame, area: Rect, state: &DetailState) {
    if state.loading {
        render_loading(frame, area, state);
        return;
    }

    match &state.detail {
        Some(detail) => render_movie(frame, area, state, detail),
        None => render_not_found(frame, area),
    }
}

fn render_loading(frame: &mut Frame, area: Rect, state: &DetailState) {
    let block = panel(format!(" {} ", state.title.to_uppercase()), true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let loading = Paragraph::new("⟳ Loading details...")
        .style(Theme::loading())
        .alignment(Alignment::Center);
    frame.render_widget(loading, inner);
}

/// Not-found panel
pub fn render_not_found(frame: &mut Frame, area: Rect) {
    let block = panel(" DETAIL ".to_string(), false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("404", Theme::error())),
        Line::from(Span::styled("Movie Not Found", Theme::title())),
        Line::from(""),
        Line::from(Span::styled(
            "The movie you're looking for doesn't exist or couldn't be loaded.",
            Theme::dimmed(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Esc ", Theme::keybind()),
            Span::styled("Back to search", Theme::keybind_desc()),
        ]),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

fn render_movie(frame: &mut Frame, area: Rect, state: &DetailState, detail: &MovieDetail) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(11), // Info
            Constraint::Length(1),  // Tabs
            Constraint::Min(3),     // Tab content
        ])
        .split(area);

    render_info(frame, chunks[0], state, detail);
    render_tabs(frame, chunks[1], state.tab);

    match state.tab {
        DetailTab::Cast => render_cast(frame, chunks[2], &state.credits, &state.list),
        DetailTab::Crew => render_crew(frame, chunks[2], &state.credits, &state.list),
        DetailTab::Details => render_extra(frame, chunks[2], state, detail),
    }
}

fn render_info(frame: &mut Frame, area: Rect, state: &DetailState, detail: &MovieDetail) {
    let block = panel(" MOVIE ".to_string(), false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner);

    let mut lines = vec![Line::from(vec![
        Span::styled("▶ ", Theme::accent()),
        Span::styled(detail.title().to_string(), Theme::title()),
        Span::styled(format!(" ({})", detail.release_year()), Theme::year()),
    ])];

    if let Some(tagline) = detail.tagline() {
        lines.push(Line::from(Span::styled(
            format!("\"{}\"", tagline),
            Theme::secondary().add_modifier(Modifier::ITALIC),
        )));
    }

    let mut meta = vec![
        Span::styled(
            format!("★ {}", detail.rating_str()),
            Theme::rating(detail.summary.vote_average),
        ),
        Span::styled(" │ ", Theme::dimmed()),
        Span::styled(detail.runtime_str(), Theme::secondary()),
    ];
    let genres = detail.genres_str();
    if !genres.is_empty() {
        meta.push(Span::styled(" │ ", Theme::dimmed()));
        meta.push(Span::styled(genres, Theme::text()));
    }
    lines.push(Line::from(meta));
    lines.push(Line::from(""));

    let overview = if detail.summary.overview.is_empty() {
        "No overview available."
    } else {
        detail.summary.overview.as_str()
    };
    lines.push(Line::from(Span::styled(overview.to_string(), Theme::text())));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), halves[0]);

    let director = state
        .credits
        .director()
        .map(|d| d.name.clone())
        .unwrap_or_else(|| "N/A".to_string());
    let money = |amount: u64| {
        if amount > 0 {
            format_currency(amount)
        } else {
            "N/A".to_string()
        }
    };
    let status = if detail.status.is_empty() {
        "N/A".to_string()
    } else {
        detail.status.clone()
    };

    let facts = vec![
        fact("Director", director),
        fact("Status", status),
        fact("Budget", money(detail.budget)),
        fact("Revenue", money(detail.revenue)),
    ];
    frame.render_widget(Paragraph::new(facts), halves[1]);
}

fn render_tabs(frame: &mut Frame, area: Rect, active: DetailTab) {
    let mut spans = Vec::new();
    for tab in DetailTab::ALL {
        let style = if tab == active {
            Theme::tab_active()
        } else {
            Theme::tab_inactive()
        };
        spans.push(Span::styled(format!(" {} ", tab.title()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("Tab ", Theme::keybind()));
    spans.push(Span::styled("switch", Theme::keybind_desc()));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Visible slice of `rows` around the selection, with the selected row marked
fn scrolled<'a>(rows: Vec<Line<'a>>, list: &ListState, height: usize) -> Vec<ListItem<'a>> {
    let mut list = list.clone();
    list.scroll_into_view(height);
    rows.into_iter()
        .enumerate()
        .skip(list.offset)
        .take(height)
        .map(|(i, line)| {
            if i == list.selected {
                ListItem::new(line).style(Theme::list_item_selected())
            } else {
                ListItem::new(line)
            }
        })
        .collect()
}

fn render_cast(frame: &mut Frame, area: Rect, credits: &Credits, list: &ListState) {
    let cast = credits.top_cast();
    let block = panel(format!(" CAST ({}) ", cast.len()), true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if cast.is_empty() {
        frame.render_widget(
            Paragraph::new("No cast information available")
                .style(Theme::dimmed())
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let rows: Vec<Line> = cast
        .iter()
        .map(|member| {
            Line::from(vec![
                Span::styled(format!("{:<28}", member.name), Theme::text()),
                Span::styled(member.character.clone(), Theme::secondary()),
            ])
        })
        .collect();
    let items = scrolled(rows, list, inner.height as usize);
    frame.render_widget(List::new(items), inner);
}

fn render_crew(frame: &mut Frame, area: Rect, credits: &Credits, list: &ListState) {
    let groups = credits.key_crew();
    let block = panel(" CREW ".to_string(), true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if groups.is_empty() {
        frame.render_widget(
            Paragraph::new("No crew information available")
                .style(Theme::dimmed())
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let rows: Vec<Line> = groups
        .iter()
        .map(|(job, people)| {
            let names: Vec<&str> = people.iter().map(|p| p.name.as_str()).collect();
            Line::from(vec![
                Span::styled(format!("{:<20}", job), Theme::accent()),
                Span::styled(names.join(", "), Theme::text()),
            ])
        })
        .collect();
    let items = scrolled(rows, list, inner.height as usize);
    frame.render_widget(List::new(items), inner);
}

fn join_or_na(names: Vec<&str>) -> String {
    if names.is_empty() {
        "N/A".to_string()
    } else {
        names.join(", ")
    }
}

fn render_extra(frame: &mut Frame, area: Rect, state: &DetailState, detail: &MovieDetail) {
    let block = panel(" DETAILS ".to_string(), true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let summary = &detail.summary;
    let mut lines = vec![
        fact("Original", summary.original_title.clone()),
        fact("Language", summary.original_language.to_uppercase()),
        fact(
            "Released",
            if summary.release_date.is_empty() {
                "TBA".to_string()
            } else {
                summary.release_date.clone()
            },
        ),
        fact("Votes", format_thousands(summary.vote_count as u64)),
        fact(
            "Studios",
            join_or_na(
                detail
                    .production_companies
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect(),
            ),
        ),
        fact(
            "Countries",
            join_or_na(
                detail
                    .production_countries
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect(),
            ),
        ),
        fact(
            "Spoken",
            join_or_na(
                detail
                    .spoken_languages
                    .iter()
                    .map(|l| l.name.as_str())
                    .collect(),
            ),
        ),
    ];
    if let Some(homepage) = detail.homepage.as_deref().filter(|h| !h.is_empty()) {
        lines.push(fact("Homepage", homepage.to_string()));
    }
    if let Some(imdb) = detail.imdb_id.as_deref().filter(|id| !id.is_empty()) {
        lines.push(fact("IMDb", format!("https://www.imdb.com/title/{}", imdb)));
    }
    lines.push(fact("Poster", state.poster_url.clone()));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
