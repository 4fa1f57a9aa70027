//! App state and core application logic
//!
//! Manages the screen state machine and keyboard handling. Key presses that
//! need data come back as [`Action`]s; the event loop turns them into fetches
//! and feeds the results back in as [`Message`]s.

use chrono::Datelike;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::coordinator::{Intent, RequestToken, ViewState};
use crate::models::{
    Credits, MovieDetail, MovieSummary, ResultPage, SearchFilters, SortKey, NOT_FOUND_TITLE,
};

/// Window title outside the detail screen
pub const APP_TITLE: &str = "CineSearch";

/// How far back the year filter reaches
pub const YEAR_SPAN: u16 = 50;

/// Minimum-rating choices, in cycling order
pub const RATING_OPTIONS: [f32; 4] = [7.0, 6.0, 5.0, 4.0];

/// Original-language choices as (ISO 639-1, label)
pub const LANGUAGE_OPTIONS: [(&str, &str); 8] = [
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
];

// =============================================================================
// App State Enum
// =============================================================================

/// Application state enum representing current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Search bar, filters and the result list
    #[default]
    Browse,
    /// Detail view for one movie
    Detail,
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Actions and Messages
// =============================================================================

/// Work requested by a key press
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Change the browse listing
    Browse(Intent),
    /// Load the detail screen for a movie
    OpenMovie(RequestToken, u64),
}

/// Results delivered back to the UI loop by fetch tasks
#[derive(Debug)]
pub enum Message {
    Genres(Vec<crate::models::Genre>),
    Results {
        token: RequestToken,
        scroll_to_top: bool,
        page: ResultPage,
    },
    Detail {
        token: RequestToken,
        detail: Option<Box<MovieDetail>>,
        credits: Credits,
        poster_url: String,
    },
}

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Move selection up by a page
    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    /// Move selection down by a page
    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible_height {
            self.offset = self.selected - visible_height + 1;
        }
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Search Input
// =============================================================================

/// Search box contents; `cursor` is a byte offset on a char boundary
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    pub query: String,
    pub cursor: usize,
}

impl SearchInput {
    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        self.query.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.query[..self.cursor].char_indices().next_back() {
            self.query.remove(idx);
            self.cursor = idx;
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.query.len() {
            self.query.remove(self.cursor);
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        if let Some((idx, _)) = self.query[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if let Some(c) = self.query[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.query.len();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }
}

// =============================================================================
// Detail State
// =============================================================================

/// Tabs on the detail screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Cast,
    Crew,
    Details,
}

impl DetailTab {
    pub const ALL: [DetailTab; 3] = [DetailTab::Cast, DetailTab::Crew, DetailTab::Details];

    pub fn next(self) -> Self {
        match self {
            DetailTab::Cast => DetailTab::Crew,
            DetailTab::Crew => DetailTab::Details,
            DetailTab::Details => DetailTab::Cast,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DetailTab::Cast => "Cast",
            DetailTab::Crew => "Crew",
            DetailTab::Details => "Details",
        }
    }
}

/// Detail screen for one movie
#[derive(Debug, Clone)]
pub struct DetailState {
    pub movie_id: u64,
    pub token: RequestToken,
    /// Title from the listing, shown while loading
    pub title: String,
    pub detail: Option<MovieDetail>,
    pub credits: Credits,
    pub poster_url: String,
    pub loading: bool,
    pub tab: DetailTab,
    pub list: ListState,
}

impl DetailState {
    pub fn new(movie_id: u64, token: RequestToken, title: impl Into<String>) -> Self {
        Self {
            movie_id,
            token,
            title: title.into(),
            detail: None,
            credits: Credits::default(),
            poster_url: String::new(),
            loading: true,
            tab: DetailTab::default(),
            list: ListState::new(0),
        }
    }

    /// Loaded, but the movie could not be fetched
    pub fn is_not_found(&self) -> bool {
        !self.loading && self.detail.is_none()
    }

    /// Rows in the active tab's list
    pub fn tab_len(&self) -> usize {
        match self.tab {
            DetailTab::Cast => self.credits.top_cast().len(),
            DetailTab::Crew => self.credits.key_crew().len(),
            DetailTab::Details => 0,
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
        self.list = ListState::new(self.tab_len());
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current state/screen
    pub state: AppState,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,

    /// Committed listing, query and filters
    pub view: ViewState,
    /// Search box text (may differ from the submitted query)
    pub input: SearchInput,
    /// Filter controls (applied immediately on change)
    pub filters: SearchFilters,
    /// Result list selection
    pub list: ListState,
    pub detail: Option<DetailState>,

    /// Newest year offered by the year filter
    pub current_year: u16,
    detail_seq: RequestToken,
}

impl Default for App {
    fn default() -> Self {
        Self {
            state: AppState::Browse,
            running: true,
            input_mode: InputMode::Normal,

            view: ViewState::new(),
            input: SearchInput::default(),
            filters: SearchFilters::default(),
            list: ListState::default(),
            detail: None,

            current_year: chrono::Local::now().year().clamp(0, u16::MAX as i32) as u16,
            detail_seq: 0,
        }
    }
}

/// Next option after `current`; wraps from the last option back to `None`
fn cycle<T: PartialEq + Clone>(current: Option<&T>, options: &[T]) -> Option<T> {
    match current.and_then(|c| options.iter().position(|o| o == c)) {
        Some(idx) => options.get(idx + 1).cloned(),
        None => options.first().cloned(),
    }
}

impl App {
    /// Create a new App instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Currently selected movie in the result list
    pub fn selected_movie(&self) -> Option<&MovieSummary> {
        self.view.results.results.get(self.list.selected)
    }

    /// Years offered by the year filter, newest first
    pub fn year_options(&self) -> Vec<u16> {
        (0..YEAR_SPAN)
            .filter_map(|back| self.current_year.checked_sub(back))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Filter Controls
    // -------------------------------------------------------------------------

    pub fn cycle_genre(&mut self) {
        let ids: Vec<u32> = self.view.genres.iter().map(|g| g.id).collect();
        self.filters.genre = cycle(self.filters.genre.as_ref(), &ids);
    }

    pub fn cycle_year(&mut self) {
        let years = self.year_options();
        self.filters.year = cycle(self.filters.year.as_ref(), &years);
    }

    pub fn cycle_rating(&mut self) {
        self.filters.min_rating = cycle(self.filters.min_rating.as_ref(), &RATING_OPTIONS);
    }

    pub fn cycle_sort(&mut self) {
        self.filters.sort = cycle(self.filters.sort.as_ref(), &SortKey::ALL);
    }

    pub fn cycle_language(&mut self) {
        let codes: Vec<String> = LANGUAGE_OPTIONS
            .iter()
            .map(|(code, _)| code.to_string())
            .collect();
        self.filters.language = cycle(self.filters.language.as_ref(), &codes);
    }

    /// Submit the search box text with the current filter controls
    fn submit(&self) -> Action {
        Action::Browse(Intent::Submit {
            query: self.input.query.clone(),
            filters: self.filters.clone(),
        })
    }

    /// Switch to the detail screen and issue a fresh detail token
    pub fn open_detail(&mut self, movie: &MovieSummary) -> Action {
        self.detail_seq += 1;
        self.detail = Some(DetailState::new(movie.id, self.detail_seq, &movie.title));
        self.state = AppState::Detail;
        self.input_mode = InputMode::Normal;
        Action::OpenMovie(self.detail_seq, movie.id)
    }

    /// Leave the detail screen
    pub fn back(&mut self) {
        self.state = AppState::Browse;
        self.detail = None;
    }

    /// Terminal window title for the current screen
    pub fn window_title(&self) -> String {
        match (&self.state, &self.detail) {
            (AppState::Detail, Some(state)) if !state.loading => match &state.detail {
                Some(detail) => detail.page_title(),
                None => NOT_FOUND_TITLE.to_string(),
            },
            _ => APP_TITLE.to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Fetch Results
    // -------------------------------------------------------------------------

    /// Apply a fetch result; stale results are dropped
    pub fn handle_message(&mut self, msg: Message) {
        match msg {
            Message::Genres(genres) => self.view.set_genres(genres),
            Message::Results {
                token,
                scroll_to_top,
                page,
            } => {
                if self.view.commit(token, page) {
                    self.list.set_len(self.view.results.results.len());
                    if scroll_to_top {
                        self.list.first();
                    }
                }
            }
            Message::Detail {
                token,
                detail,
                credits,
                poster_url,
            } => match &mut self.detail {
                Some(state) if state.token == token => {
                    state.detail = detail.map(|d| *d);
                    state.credits = credits;
                    state.poster_url = poster_url;
                    state.loading = false;
                    state.list = ListState::new(state.tab_len());
                }
                _ => tracing::debug!(token, "discarding stale detail response"),
            },
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returning the fetch it requires (if any)
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        if self.input_mode == InputMode::Editing {
            return self.handle_editing_key(key);
        }

        match self.state {
            AppState::Browse => self.handle_browse_key(key),
            AppState::Detail => self.handle_detail_key(key),
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                return Some(self.submit());
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear()
            }
            KeyCode::Char(c) => self.input.insert(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.cursor_left(),
            KeyCode::Right => self.input.cursor_right(),
            KeyCode::Home => self.input.cursor_home(),
            KeyCode::End => self.input.cursor_end(),
            _ => {}
        }
        None
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.input_mode = InputMode::Editing;
                self.input.cursor_end();
            }
            KeyCode::Up | KeyCode::Char('k') => self.list.up(),
            KeyCode::Down | KeyCode::Char('j') => self.list.down(),
            KeyCode::PageUp => self.list.page_up(10),
            KeyCode::PageDown => self.list.page_down(10),
            KeyCode::Home => self.list.first(),
            KeyCode::End => self.list.last(),
            KeyCode::Enter => {
                let movie = self.selected_movie()?.clone();
                return Some(self.open_detail(&movie));
            }
            KeyCode::Char('n') | KeyCode::Right
                if !self.view.loading && self.view.has_next_page() =>
            {
                return Some(Action::Browse(Intent::ChangePage(self.view.page + 1)));
            }
            KeyCode::Char('p') | KeyCode::Left
                if !self.view.loading && self.view.has_prev_page() =>
            {
                return Some(Action::Browse(Intent::ChangePage(self.view.page - 1)));
            }
            KeyCode::Char('g') => {
                self.cycle_genre();
                return Some(self.submit());
            }
            KeyCode::Char('y') => {
                self.cycle_year();
                return Some(self.submit());
            }
            KeyCode::Char('r') => {
                self.cycle_rating();
                return Some(self.submit());
            }
            KeyCode::Char('o') => {
                self.cycle_sort();
                return Some(self.submit());
            }
            KeyCode::Char('l') => {
                self.cycle_language();
                return Some(self.submit());
            }
            KeyCode::Char('c') => {
                self.filters = SearchFilters::default();
                return Some(Action::Browse(Intent::ClearFilters));
            }
            _ => {}
        }
        None
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc | KeyCode::Backspace => self.back(),
            KeyCode::Tab => {
                if let Some(detail) = &mut self.detail {
                    detail.next_tab();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(detail) = &mut self.detail {
                    detail.list.up();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(detail) = &mut self.detail {
                    detail.list.down();
                }
            }
            _ => {}
        }
        None
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::Endpoint;
    use crate::models::Genre;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn movie(id: u64, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn results(count: u64, total_pages: u32, total_results: u32) -> ResultPage {
        ResultPage {
            page: 1,
            results: (1..=count).map(|i| movie(i, &format!("Movie {}", i))).collect(),
            total_pages,
            total_results,
        }
    }

    /// App with page 1 of a 3-page listing committed
    fn loaded_app() -> App {
        let mut app = App::new();
        let plan = app.view.apply(Intent::InitialLoad);
        app.handle_message(Message::Results {
            token: plan.token,
            scroll_to_top: plan.scroll_to_top,
            page: results(20, 3, 47),
        });
        app
    }

    // -------------------------------------------------------------------------
    // ListState Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_list_state_navigation() {
        let mut list = ListState::new(5);
        list.up();
        assert_eq!(list.selected, 0);

        list.down();
        list.down();
        assert_eq!(list.selected, 2);

        list.last();
        assert_eq!(list.selected, 4);
        list.down();
        assert_eq!(list.selected, 4);

        list.page_up(10);
        assert_eq!(list.selected, 0);
        list.page_down(3);
        assert_eq!(list.selected, 3);
    }

    #[test]
    fn test_list_state_set_len() {
        let mut list = ListState::new(10);
        list.last();
        list.set_len(4);
        assert_eq!(list.selected, 3);
        list.set_len(0);
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_scroll_into_view() {
        let mut list = ListState::new(30);
        list.page_down(15);
        list.scroll_into_view(10);
        assert_eq!(list.offset, 6);
        list.first();
        list.scroll_into_view(10);
        assert_eq!(list.offset, 0);
    }

    // -------------------------------------------------------------------------
    // Search Input Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_search_input_editing() {
        let mut input = SearchInput::default();
        for c in "hello".chars() {
            input.insert(c);
        }
        assert_eq!(input.cursor, 5);

        input.cursor_left();
        input.cursor_left();
        input.insert('X');
        assert_eq!(input.query, "helXlo");

        input.backspace();
        assert_eq!(input.query, "hello");

        input.cursor_home();
        input.delete();
        assert_eq!(input.query, "ello");
    }

    #[test]
    fn test_search_input_multibyte() {
        let mut input = SearchInput::default();
        for c in "Amélie".chars() {
            input.insert(c);
        }
        input.cursor_left();
        input.cursor_left();
        input.cursor_left();
        input.backspace();
        assert_eq!(input.query, "Amlie");
        input.cursor_right();
        assert_eq!(&input.query[input.cursor..], "ie");
    }

    // -------------------------------------------------------------------------
    // Key Handling Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.running);

        let mut app = App::new();
        app.input_mode = InputMode::Editing;
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_editing_submits_query_and_filters() {
        let mut app = App::new();
        app.filters.year = Some(2008);
        assert!(app.handle_key(key(KeyCode::Char('/'))).is_none());
        assert_eq!(app.input_mode, InputMode::Editing);

        for c in "dark knight".chars() {
            assert!(app.handle_key(key(KeyCode::Char(c))).is_none());
        }
        assert_eq!(app.input.query, "dark knight");

        let action = app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(
            action,
            Some(Action::Browse(Intent::Submit {
                query: "dark knight".into(),
                filters: SearchFilters {
                    year: Some(2008),
                    ..Default::default()
                },
            }))
        );
    }

    #[test]
    fn test_escape_leaves_editing_without_submit() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('s')));
        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.handle_key(key(KeyCode::Esc)).is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.running);
    }

    #[test]
    fn test_filter_keys_resubmit() {
        let mut app = App::new();
        app.current_year = 2024;
        app.view.set_genres(vec![
            Genre {
                id: 28,
                name: "Action".into(),
            },
            Genre {
                id: 35,
                name: "Comedy".into(),
            },
        ]);

        let action = app.handle_key(key(KeyCode::Char('g')));
        assert_eq!(app.filters.genre, Some(28));
        assert!(matches!(action, Some(Action::Browse(Intent::Submit { .. }))));

        app.handle_key(key(KeyCode::Char('g')));
        assert_eq!(app.filters.genre, Some(35));
        app.handle_key(key(KeyCode::Char('g')));
        assert_eq!(app.filters.genre, None);

        app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(app.filters.year, Some(2024));
        app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(app.filters.year, Some(2023));

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.filters.min_rating, Some(7.0));

        app.handle_key(key(KeyCode::Char('o')));
        assert_eq!(app.filters.sort, Some(SortKey::PopularityDesc));

        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.filters.language.as_deref(), Some("en"));
    }

    #[test]
    fn test_year_options_span() {
        let mut app = App::new();
        app.current_year = 2024;
        let years = app.year_options();
        assert_eq!(years.len(), 50);
        assert_eq!(years[0], 2024);
        assert_eq!(years[49], 1975);
    }

    #[test]
    fn test_rating_cycle_wraps_to_any() {
        let mut app = App::new();
        for expected in RATING_OPTIONS {
            app.cycle_rating();
            assert_eq!(app.filters.min_rating, Some(expected));
        }
        app.cycle_rating();
        assert_eq!(app.filters.min_rating, None);
    }

    #[test]
    fn test_clear_filters_key() {
        let mut app = App::new();
        app.filters.genre = Some(28);
        app.filters.language = Some("ko".into());
        let action = app.handle_key(key(KeyCode::Char('c')));
        assert!(app.filters.is_empty());
        assert_eq!(action, Some(Action::Browse(Intent::ClearFilters)));
    }

    #[test]
    fn test_page_keys_respect_bounds() {
        let mut app = loaded_app();
        assert!(app.handle_key(key(KeyCode::Char('p'))).is_none());

        let action = app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(action, Some(Action::Browse(Intent::ChangePage(2))));

        let Some(Action::Browse(intent)) = action else {
            panic!("Expected browse action");
        };
        let plan = app.view.apply(intent);
        app.handle_message(Message::Results {
            token: plan.token,
            scroll_to_top: plan.scroll_to_top,
            page: results(20, 3, 47),
        });
        assert_eq!(
            app.handle_key(key(KeyCode::Left)),
            Some(Action::Browse(Intent::ChangePage(1)))
        );
    }

    #[test]
    fn test_page_keys_wait_for_pending_listing() {
        let mut app = loaded_app();
        let plan = app.view.apply(Intent::ChangePage(2));

        // old listing had three pages, but page 2 has not landed yet
        assert!(app.handle_key(key(KeyCode::Char('n'))).is_none());
        assert!(app.handle_key(key(KeyCode::Left)).is_none());

        app.handle_message(Message::Results {
            token: plan.token,
            scroll_to_top: plan.scroll_to_top,
            page: results(20, 3, 47),
        });
        assert_eq!(
            app.handle_key(key(KeyCode::Char('n'))),
            Some(Action::Browse(Intent::ChangePage(3)))
        );
    }

    #[test]
    fn test_new_results_scroll_to_top() {
        let mut app = loaded_app();
        app.list.last();
        assert_eq!(app.list.selected, 19);

        let plan = app.view.apply(Intent::ChangePage(2));
        assert_eq!(plan.endpoint, Endpoint::Popular);
        app.handle_message(Message::Results {
            token: plan.token,
            scroll_to_top: plan.scroll_to_top,
            page: results(20, 3, 47),
        });
        assert_eq!(app.list.selected, 0);
    }

    #[test]
    fn test_stale_results_ignored() {
        let mut app = App::new();
        let old = app.view.apply(Intent::InitialLoad);
        let _new = app.view.apply(Intent::ClearFilters);
        app.handle_message(Message::Results {
            token: old.token,
            scroll_to_top: false,
            page: results(5, 1, 5),
        });
        assert_eq!(app.list.len, 0);
        assert!(app.view.loading);
    }

    // -------------------------------------------------------------------------
    // Detail Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_enter_opens_detail() {
        let mut app = loaded_app();
        app.list.down();
        let action = app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Detail);

        let Some(Action::OpenMovie(token, id)) = action else {
            panic!("Expected OpenMovie action");
        };
        assert_eq!(id, 2);
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.token, token);
        assert_eq!(detail.title, "Movie 2");
        assert!(detail.loading);
    }

    #[test]
    fn test_enter_on_empty_list_does_nothing() {
        let mut app = App::new();
        assert!(app.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(app.state, AppState::Browse);
    }

    #[test]
    fn test_detail_not_found() {
        let mut app = loaded_app();
        let Some(Action::OpenMovie(token, _)) = app.handle_key(key(KeyCode::Enter)) else {
            panic!("Expected OpenMovie action");
        };
        app.handle_message(Message::Detail {
            token,
            detail: None,
            credits: Credits::default(),
            poster_url: String::new(),
        });
        assert!(app.detail.as_ref().unwrap().is_not_found());
        assert_eq!(app.window_title(), NOT_FOUND_TITLE);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Browse);
        assert!(app.detail.is_none());
        assert_eq!(app.window_title(), APP_TITLE);
    }

    #[test]
    fn test_stale_detail_ignored() {
        let mut app = loaded_app();
        let Some(Action::OpenMovie(first, _)) = app.handle_key(key(KeyCode::Enter)) else {
            panic!("Expected OpenMovie action");
        };
        app.handle_key(key(KeyCode::Esc));
        app.list.down();
        app.handle_key(key(KeyCode::Enter));

        app.handle_message(Message::Detail {
            token: first,
            detail: None,
            credits: Credits::default(),
            poster_url: String::new(),
        });
        let detail = app.detail.as_ref().unwrap();
        assert!(detail.loading);
        assert_eq!(detail.movie_id, 2);
    }

    #[test]
    fn test_detail_tabs_cycle() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.detail.as_ref().unwrap().tab, DetailTab::Crew);
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.detail.as_ref().unwrap().tab, DetailTab::Cast);
    }

    #[test]
    fn test_ctrl_u_clears_search_box() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('/')));
        for c in "alien".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(app.input.query, "");
        assert_eq!(app.input.cursor, 0);
        assert_eq!(app.input_mode, InputMode::Editing);
    }
}
